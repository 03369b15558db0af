/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod album;
pub mod api;
pub mod client;
pub mod creds;
pub mod errors;
pub mod image;
pub mod oauth;
pub mod paging;
mod parsers;
pub mod rate_limit;
pub mod user;

pub use album::*;
pub use api::{API_ORIGIN, ApiErrorCodes, ApiParams};
pub use client::*;
pub use creds::*;
pub use errors::*;
pub use image::*;
pub use oauth::*;
pub use paging::*;
pub use rate_limit::*;
pub use user::*;
