// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used in xero applications.
pub const XERO_APP_TYPE: &str = "XERO_APP_TYPE";
pub const XERO_CONSUMER_KEY: &str = "XERO_CONSUMER_KEY";
pub const XERO_CONSUMER_SECRET: &str = "XERO_CONSUMER_SECRET";
pub const XERO_PRIVATE_KEY_FILE: &str = "XERO_PRIVATE_KEY_FILE";

// OAuth 1.0a endpoints. The authorize URL format is a byte-for-byte
// compatibility contract with the provider.
pub const REQUEST_TOKEN_URL: &str = "https://api.xero.com/oauth/RequestToken";
pub const ACCESS_TOKEN_URL: &str = "https://api.xero.com/oauth/AccessToken";
pub const AUTHORIZE_URL: &str = "https://api.xero.com/oauth/Authorize";

pub const OAUTH_VERSION: &str = "1.0";

/// AsciiSet for OAuth 1.0a percent encoding (RFC 5849 Section 3.6).
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static OAUTH_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
