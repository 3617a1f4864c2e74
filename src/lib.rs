//! # Back Office Core
//!
//! An embeddable content store for a static site's admin back-office,
//! designed for FFI (Foreign Function Interface) integration with web-view
//! shells and other cross-platform UI hosts. Built on redb for a stable,
//! single-file embedded database.
//!
//! ## Features
//!
//! - **redb-based storage**: pure-Rust embedded database, one file on disk
//! - **FFI-optimized**: C-compatible surface exchanging JSON payloads
//! - **Schema-compatible**: persisted values use the same camelCase JSON
//!   shapes a browser back-office keeps in local storage
//! - **Fail-open reads**: absent or corrupt values degrade to empty
//!   collections instead of surfacing errors to the UI
//! - **Safe error handling**: no `unwrap()` calls in production code
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::ffi::CString;
//! use back_office_core::{open_store, post_video, get_videos};
//!
//! // Open (or create) the store
//! let name = CString::new("back_office").unwrap();
//! let store = open_store(name.as_ptr());
//!
//! // Create a video record
//! let payload = CString::new(
//!     r#"{"title":"Demo","category":"Software","type":"youtube","videoData":"https://youtu.be/x"}"#,
//! ).unwrap();
//! let result = post_video(store, payload.as_ptr());
//!
//! // List everything back
//! let all = get_videos(store);
//! ```
//!
//! ## FFI Functions
//!
//! Store lifecycle: [`open_store`], [`close_store`].
//!
//! Videos: [`get_videos`], [`post_video`], [`delete_video`], plus the
//! dashboard queries [`get_video_stats`], [`get_upload_histogram`],
//! [`get_category_breakdown`], [`get_recent_videos`] and
//! [`get_last_update`].
//!
//! Solution cards: [`get_solution_cards`], [`post_solution_card`],
//! [`put_solution_card`], [`delete_solution_card`].
//!
//! About profile: [`get_about`], [`put_about`], [`get_about_image`],
//! [`put_about_image`].
//!
//! Session flag: [`admin_login`], [`admin_logout`],
//! [`admin_session_active`].
//!
//! Every function returns a JSON-serialized [`AppResponse`] C string (except
//! [`open_store`], which returns the store pointer). Returned strings are
//! allocated with `CString::into_raw` and must be reclaimed by the caller.

pub mod app_response;
pub mod content_model;
pub mod content_store;
pub mod error;
pub mod media;
pub mod session;
pub mod stats;
pub mod storage;


use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use chrono::Local;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app_response::AppResponse;
use crate::content_model::{AboutProfile, NewVideo, SolutionCardInput};
use crate::content_store::ContentStore;

/// Opens a content store persisted under the given name.
///
/// The database is created as a single `<name>.redb` file. The same name
/// always resolves to the same content, so a host can reopen its store
/// across restarts.
///
/// # Parameters
///
/// * `name` - A null-terminated C string with the store name
///
/// # Returns
///
/// A pointer to the [`ContentStore`] on success, or a null pointer on
/// failure. The caller owns the pointer and must release it with
/// [`close_store`].
///
/// # Safety
///
/// The input must be a valid null-terminated UTF-8 string. The returned
/// pointer must not be used after [`close_store`].
///
/// # Errors
///
/// Returns a null pointer if the name pointer is null, the name is not
/// valid UTF-8, or the database cannot be opened.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn open_store(name: *const c_char) -> *mut ContentStore {
    if name.is_null() {
        warn!("Null name pointer passed to open_store");
        return std::ptr::null_mut();
    }

    let name_str = match unsafe { CStr::from_ptr(name).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in name parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    let db_path = format!("{name_str}.redb");
    info!("Opening content store at: {db_path}");

    match ContentStore::open(&db_path) {
        Ok(store) => Box::into_raw(Box::new(store)),
        Err(e) => {
            warn!("Failed to open content store at {db_path}: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Closes the store and releases its memory.
///
/// The pointer is invalid after this call; using it again is undefined
/// behavior. Passing null is reported as `BadRequest` and is otherwise
/// harmless.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_store(store: *mut ContentStore) -> *const c_char {
    if store.is_null() {
        let error = AppResponse::BadRequest("Null store pointer passed to close_store".to_string());
        return response_to_c_string(&error);
    }

    drop(unsafe { Box::from_raw(store) });
    info!("Content store closed");
    response_to_c_string(&AppResponse::success("Store closed successfully"))
}

// ── videos ──────────────────────────────────────────────────────────────

/// Returns all video records as a JSON array, insertion order preserved.
///
/// An absent or corrupt collection yields an empty array, never an error.
///
/// # Parameters
///
/// * `store` - Pointer to the store instance
///
/// # Returns
///
/// A JSON-formatted C string with the operation result. The returned string
/// must be freed by the caller.
///
/// # Safety
///
/// The store parameter must be a valid pointer from [`open_store`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_videos(store: *mut ContentStore) -> *const c_char {
    let store = match store_from_ptr(store, "get_videos") {
        Ok(s) => s,
        Err(err) => return err,
    };

    json_response(&store.list_videos())
}

/// Creates a video record from a JSON payload (HTTP-style naming).
///
/// The payload is a [`NewVideo`]: `title`, optional `desc`, `category`,
/// `type` (`"local"` or `"youtube"`) and the type-dependent fields
/// (`videoData`, `fileName`, `fileSize`). The store assigns the id and the
/// upload timestamp.
///
/// # Parameters
///
/// * `store` - Pointer to the store instance
/// * `json_ptr` - Null-terminated C string containing the JSON payload
///
/// # Returns
///
/// On success, `Ok` carrying the created record as JSON. A missing title,
/// file or URL yields `ValidationError`; malformed JSON yields
/// `SerializationError`.
///
/// # Safety
///
/// Both parameters must be valid pointers.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn post_video(store: *mut ContentStore, json_ptr: *const c_char) -> *const c_char {
    let store = match store_from_ptr(store, "post_video") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(raw) => raw,
        Err(err) => return err,
    };

    let input: NewVideo = match parse_payload(&json_str) {
        Ok(input) => input,
        Err(err) => return err,
    };

    match store.create_video(input) {
        Ok(record) => json_response(&record),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Deletes the video with the given id.
///
/// An absent id is a no-op, not an error: the response is still `Ok`, with
/// a message saying nothing was deleted.
///
/// # Safety
///
/// The store parameter must be a valid pointer.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn delete_video(store: *mut ContentStore, id: u64) -> *const c_char {
    let store = match store_from_ptr(store, "delete_video") {
        Ok(s) => s,
        Err(err) => return err,
    };

    match store.delete_video(id) {
        Ok(true) => response_to_c_string(&AppResponse::success("Video deleted successfully")),
        Ok(false) => response_to_c_string(&AppResponse::success(format!(
            "No video with id {id}; nothing was deleted"
        ))),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Returns the dashboard stat-tile numbers for the video collection.
///
/// The JSON shape is `{"total", "countByType": {"local", "youtube"},
/// "distinctCategoryCount", "createdTodayCount"}`. "Today" is the host's
/// local calendar date at call time.
///
/// # Safety
///
/// The store parameter must be a valid pointer.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_video_stats(store: *mut ContentStore) -> *const c_char {
    let store = match store_from_ptr(store, "get_video_stats") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let videos = store.list_videos();
    json_response(&stats::video_stats(&videos, Local::now().date_naive()))
}

/// Returns the upload histogram for the last `days` calendar days ending
/// today, oldest day first, as a JSON array of `{"label", "count"}`.
///
/// Passing `0` uses the dashboard default of 7 days.
///
/// # Safety
///
/// The store parameter must be a valid pointer.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_upload_histogram(store: *mut ContentStore, days: u32) -> *const c_char {
    let store = match store_from_ptr(store, "get_upload_histogram") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let days = if days == 0 { 7 } else { days };
    let videos = store.list_videos();
    json_response(&stats::daily_histogram(
        &videos,
        days,
        Local::now().date_naive(),
    ))
}

/// Returns the per-category tally as a JSON object; categories with no
/// records are omitted.
///
/// # Safety
///
/// The store parameter must be a valid pointer.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_category_breakdown(store: *mut ContentStore) -> *const c_char {
    let store = match store_from_ptr(store, "get_category_breakdown") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let videos = store.list_videos();
    json_response(&stats::category_breakdown(&videos))
}

/// Returns the most recently uploaded records, newest first, as a JSON
/// array. Passing `0` uses the dashboard default of 5 entries.
///
/// # Safety
///
/// The store parameter must be a valid pointer.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_recent_videos(store: *mut ContentStore, limit: u32) -> *const c_char {
    let store = match store_from_ptr(store, "get_recent_videos") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let limit = if limit == 0 { 5 } else { limit };
    let videos = store.list_videos();
    json_response(&stats::recent_videos(&videos, limit as usize))
}

/// Returns the `lastUpdate` marker as an RFC 3339 timestamp, or `NotFound`
/// when no mutating video/about operation was ever recorded.
///
/// # Safety
///
/// The store parameter must be a valid pointer.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_last_update(store: *mut ContentStore) -> *const c_char {
    let store = match store_from_ptr(store, "get_last_update") {
        Ok(s) => s,
        Err(err) => return err,
    };

    match store.last_update() {
        Some(ts) => response_to_c_string(&AppResponse::success(ts.to_rfc3339())),
        None => response_to_c_string(&AppResponse::NotFound(
            "No update recorded yet".to_string(),
        )),
    }
}

// ── solution cards ──────────────────────────────────────────────────────

/// Returns all solution cards as a JSON array, insertion order preserved.
///
/// # Safety
///
/// The store parameter must be a valid pointer.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_solution_cards(store: *mut ContentStore) -> *const c_char {
    let store = match store_from_ptr(store, "get_solution_cards") {
        Ok(s) => s,
        Err(err) => return err,
    };

    json_response(&store.list_solution_cards())
}

/// Creates a solution card from a JSON payload (HTTP-style naming).
///
/// The payload is a [`SolutionCardInput`]: `title`, optional `desc`,
/// `mediaType` (`"video"` or `"youtube_embed"`) and `media`. Title and
/// media are required.
///
/// # Safety
///
/// Both parameters must be valid pointers.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn post_solution_card(
    store: *mut ContentStore,
    json_ptr: *const c_char,
) -> *const c_char {
    let store = match store_from_ptr(store, "post_solution_card") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(raw) => raw,
        Err(err) => return err,
    };

    let input: SolutionCardInput = match parse_payload(&json_str) {
        Ok(input) => input,
        Err(err) => return err,
    };

    match store.create_solution_card(input) {
        Ok(record) => json_response(&record),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Replaces every mutable field of an existing solution card (HTTP-style
/// naming). Unknown ids yield `NotFound`.
///
/// # Safety
///
/// Both pointer parameters must be valid.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn put_solution_card(
    store: *mut ContentStore,
    id: u64,
    json_ptr: *const c_char,
) -> *const c_char {
    let store = match store_from_ptr(store, "put_solution_card") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(raw) => raw,
        Err(err) => return err,
    };

    let input: SolutionCardInput = match parse_payload(&json_str) {
        Ok(input) => input,
        Err(err) => return err,
    };

    match store.update_solution_card(id, input) {
        Ok(record) => json_response(&record),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Deletes the solution card with the given id; absent ids are a no-op.
///
/// # Safety
///
/// The store parameter must be a valid pointer.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn delete_solution_card(store: *mut ContentStore, id: u64) -> *const c_char {
    let store = match store_from_ptr(store, "delete_solution_card") {
        Ok(s) => s,
        Err(err) => return err,
    };

    match store.delete_solution_card(id) {
        Ok(true) => {
            response_to_c_string(&AppResponse::success("Solution card deleted successfully"))
        }
        Ok(false) => response_to_c_string(&AppResponse::success(format!(
            "No solution card with id {id}; nothing was deleted"
        ))),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

// ── about profile ───────────────────────────────────────────────────────

/// Returns the about profile as JSON. An absent or corrupt stored profile
/// yields the default (all-empty) profile.
///
/// # Safety
///
/// The store parameter must be a valid pointer.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_about(store: *mut ContentStore) -> *const c_char {
    let store = match store_from_ptr(store, "get_about") {
        Ok(s) => s,
        Err(err) => return err,
    };

    json_response(&store.load_about())
}

/// Replaces the whole about profile from a JSON payload (HTTP-style
/// naming). There are no partial updates.
///
/// # Safety
///
/// Both parameters must be valid pointers.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn put_about(store: *mut ContentStore, json_ptr: *const c_char) -> *const c_char {
    let store = match store_from_ptr(store, "put_about") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(raw) => raw,
        Err(err) => return err,
    };

    let profile: AboutProfile = match parse_payload(&json_str) {
        Ok(profile) => profile,
        Err(err) => return err,
    };

    match store.save_about(&profile) {
        Ok(()) => response_to_c_string(&AppResponse::success("About data saved")),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Returns the encoded profile image, or `NotFound` if none is stored.
///
/// # Safety
///
/// The store parameter must be a valid pointer.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_about_image(store: *mut ContentStore) -> *const c_char {
    let store = match store_from_ptr(store, "get_about_image") {
        Ok(s) => s,
        Err(err) => return err,
    };

    match store.load_about_image() {
        Some(encoded) => response_to_c_string(&AppResponse::Ok(encoded)),
        None => response_to_c_string(&AppResponse::NotFound(
            "No profile image stored".to_string(),
        )),
    }
}

/// Stores the encoded profile image, replacing any prior one.
///
/// # Safety
///
/// Both parameters must be valid pointers.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn put_about_image(
    store: *mut ContentStore,
    data_ptr: *const c_char,
) -> *const c_char {
    let store = match store_from_ptr(store, "put_about_image") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let encoded = match c_ptr_to_string(data_ptr, "image data") {
        Ok(raw) => raw,
        Err(err) => return err,
    };

    match store.save_about_image(&encoded) {
        Ok(()) => response_to_c_string(&AppResponse::success("Profile image saved")),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

// ── session flag ────────────────────────────────────────────────────────

/// Checks the credentials and opens an admin session on a match.
///
/// Bad credentials yield `BadRequest`. This is a client-side flag, not a
/// security boundary.
///
/// # Safety
///
/// All pointer parameters must be valid.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn admin_login(
    store: *mut ContentStore,
    email_ptr: *const c_char,
    password_ptr: *const c_char,
) -> *const c_char {
    let store = match store_from_ptr(store, "admin_login") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let email = match c_ptr_to_string(email_ptr, "email") {
        Ok(raw) => raw,
        Err(err) => return err,
    };

    let password = match c_ptr_to_string(password_ptr, "password") {
        Ok(raw) => raw,
        Err(err) => return err,
    };

    match store.login(&email, &password) {
        Ok(true) => response_to_c_string(&AppResponse::success("Session opened")),
        Ok(false) => response_to_c_string(&AppResponse::BadRequest(
            "Invalid credentials".to_string(),
        )),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Closes the admin session. Idempotent.
///
/// # Safety
///
/// The store parameter must be a valid pointer.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn admin_logout(store: *mut ContentStore) -> *const c_char {
    let store = match store_from_ptr(store, "admin_logout") {
        Ok(s) => s,
        Err(err) => return err,
    };

    match store.logout() {
        Ok(()) => response_to_c_string(&AppResponse::success("Session closed")),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Reports whether an admin session is active (`Ok("true")`/`Ok("false")`).
///
/// # Safety
///
/// The store parameter must be a valid pointer.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn admin_session_active(store: *mut ContentStore) -> *const c_char {
    let store = match store_from_ptr(store, "admin_session_active") {
        Ok(s) => s,
        Err(err) => return err,
    };

    response_to_c_string(&AppResponse::success(store.is_logged_in().to_string()))
}

// ── helpers ─────────────────────────────────────────────────────────────

/// Dereferences the store pointer, reporting null as a `BadRequest`
/// response naming the calling function.
fn store_from_ptr<'a>(
    ptr: *mut ContentStore,
    caller: &str,
) -> Result<&'a ContentStore, *const c_char> {
    match unsafe { ptr.as_ref() } {
        Some(store) => Ok(store),
        None => {
            warn!("Null store pointer passed to {caller}");
            let error =
                AppResponse::BadRequest(format!("Null store pointer passed to {caller}"));
            Err(response_to_c_string(&error))
        }
    }
}

/// Deserializes a JSON payload, reporting failures as a
/// `SerializationError` response.
fn parse_payload<T: DeserializeOwned>(raw: &str) -> Result<T, *const c_char> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Invalid JSON: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}

/// Serializes a value and wraps it in an `Ok` envelope.
fn json_response<T: Serialize>(value: &T) -> *const c_char {
    match serde_json::to_string(value) {
        Ok(json) => response_to_c_string(&AppResponse::Ok(json)),
        Err(e) => {
            let error =
                AppResponse::SerializationError(format!("Failed to serialize result: {e}"));
            response_to_c_string(&error)
        }
    }
}

/// Converts an [`AppResponse`] to a C-compatible string.
///
/// Returns a pointer to a null-terminated C string containing the JSON
/// response; the caller is responsible for freeing it. Returns a null
/// pointer if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a Rust `String`, handling null pointers
/// and invalid UTF-8 with a descriptive `BadRequest` response.
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
