//! Traversal helpers over parsed markup
//!
//! `scraper` selects descendants; the page structure is described in terms of
//! direct children, so these helpers filter an element's children by selector
//! instead.

use scraper::{ElementRef, Node, Selector};

/// Element children of `element`, in document order
pub fn element_children<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// Element children of `element` matching `selector`
pub fn children<'a, 's>(
    element: ElementRef<'a>,
    selector: &'s Selector,
) -> impl Iterator<Item = ElementRef<'a>> + 's
where
    'a: 's,
{
    element_children(element).filter(move |child| selector.matches(child))
}

/// First element child of `element` matching `selector`
pub fn first_child<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element_children(element).find(|child| selector.matches(child))
}

/// Concatenated text of `element` and its descendants
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

pub fn trimmed_text(element: ElementRef<'_>) -> String {
    text(element).trim().to_string()
}

/// Text of `element` as if the children matching `excluded` were removed
pub fn text_excluding(element: ElementRef<'_>, excluded: &Selector) -> String {
    let mut out = String::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    if !excluded.matches(&child) {
                        out.extend(child.text());
                    }
                }
            }
            _ => {}
        }
    }
    out
}

pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}
