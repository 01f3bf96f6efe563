//! Transport layer: wire-format details (form encoding and JSON decoding).

mod verify;

pub use verify::{decode_verify_json_response, encode_verify_form};
