//! FFI interface for C/C++ interop
//!
//! Parses definition pages through C-compatible functions. Options go in and
//! results come out as JSON.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::client::definition_url;
use crate::constants::BASE_URL;
use crate::error::Result;
use crate::options::ParserOptions;
use crate::parser::parse;

/// Result struct returned to the caller
/// Both pointers are owned by Rust and must be freed via dex_free_result
#[repr(C)]
pub struct DexResultFFI {
    /// Result payload (null-terminated), or null on failure
    pub json_ptr: *mut c_char,
    /// Error message (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Parse a definition page.
///
/// # Arguments
/// * `html_ptr` - Pointer to the page contents (UTF-8, not necessarily null-terminated)
/// * `html_len` - Length of the page contents in bytes
/// * `options_json` - JSON-serialized ParserOptions (null-terminated); null or
///   empty uses the defaults
///
/// # Returns
/// DexResultFFI with either json_ptr set to the serialized Results or error_ptr set
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - `options_json` must be null or a valid null-terminated C string
/// - Caller must free the result via `dex_free_result`
#[no_mangle]
pub unsafe extern "C" fn dex_parse(
    html_ptr: *const c_char,
    html_len: usize,
    options_json: *const c_char,
) -> DexResultFFI {
    let html = if html_ptr.is_null() || html_len == 0 {
        ""
    } else {
        let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
        match std::str::from_utf8(slice) {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in HTML content"),
        }
    };

    let options_str = if options_json.is_null() {
        ""
    } else {
        match CStr::from_ptr(options_json).to_str() {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in options JSON"),
        }
    };
    let options = match read_options(options_str) {
        Ok(options) => options,
        Err(e) => return make_error_result(&e.to_string()),
    };

    match parse(html, &options) {
        Ok(results) => match serde_json::to_string(&results) {
            Ok(json) => make_ok_result(json),
            Err(e) => make_error_result(&format!("Failed to serialize results: {}", e)),
        },
        Err(e) => make_error_result(&e.to_string()),
    }
}

/// Build the definition page link for a word.
///
/// # Safety
/// - `word` must be a valid null-terminated C string
/// - Caller must free the result via `dex_free_result`
#[no_mangle]
pub unsafe extern "C" fn dex_definition_url(word: *const c_char) -> DexResultFFI {
    if word.is_null() {
        return make_error_result("Word is null");
    }
    let word = match CStr::from_ptr(word).to_str() {
        Ok(s) => s,
        Err(_) => return make_error_result("Invalid UTF-8 in word"),
    };

    match definition_url(BASE_URL, word) {
        Ok(url) => make_ok_result(url.into()),
        Err(e) => make_error_result(&e.to_string()),
    }
}

/// Free a DexResultFFI returned by this library
///
/// # Safety
/// - `result` must have been returned by `dex_parse` or `dex_definition_url`
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn dex_free_result(result: DexResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

/// Options from their JSON form; blank input means the defaults
fn read_options(options_json: &str) -> Result<ParserOptions> {
    if options_json.trim().is_empty() {
        return Ok(ParserOptions::default());
    }
    Ok(serde_json::from_str(options_json)?)
}

fn make_ok_result(payload: String) -> DexResultFFI {
    match CString::new(payload) {
        Ok(cstr) => DexResultFFI {
            json_ptr: cstr.into_raw(),
            error_ptr: ptr::null_mut(),
        },
        Err(_) => make_error_result("Result contains null bytes"),
    }
}

// Helper to create error result
fn make_error_result(msg: &str) -> DexResultFFI {
    let error_cstr = CString::new(msg).unwrap_or_else(|_| CString::from(c"Unknown error"));
    DexResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}
