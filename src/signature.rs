//! Request signing.
//!
//! When a client secret is configured, every request carries
//! `X-Veryfi-Request-Timestamp` and `X-Veryfi-Request-Signature`. The signature
//! is an HMAC-SHA256 over a canonical payload string built from the timestamp
//! and the request arguments in their insertion order:
//!
//! ```text
//! timestamp:<ms>,<key1>:<value1>,<key2>:<value2>,...
//! ```
//!
//! Both the secret and the payload are URI-encoded before hashing and the
//! digest is base64 encoded. The server recomputes the same string, so the
//! value coercion below must stay byte-for-byte stable.

use crate::error::{Result, VeryfiError};
use crate::request::{Argument, RequestArguments};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;
use sha2::Sha256;

/// Characters left untouched by URI encoding (`encodeURI`).
static URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Placeholder used for objects and uploads in the payload string.
const OBJECT_PLACEHOLDER: &str = "[object Object]";

/// Build the canonical payload string for `arguments` at `timestamp`.
pub fn signing_payload(arguments: &RequestArguments, timestamp: i64) -> String {
    let mut payload = format!("timestamp:{}", timestamp);
    for (key, argument) in arguments.iter() {
        payload.push(',');
        payload.push_str(key);
        payload.push(':');
        match argument {
            Argument::Value(value) => payload.push_str(&coerce(value)),
            Argument::File(_) => payload.push_str(OBJECT_PLACEHOLDER),
        }
    }
    payload
}

/// Compute the base64 HMAC-SHA256 signature of a request.
pub fn generate_signature(
    secret: &str,
    arguments: &RequestArguments,
    timestamp: i64,
) -> Result<String> {
    let payload = signing_payload(arguments, timestamp);
    let key = uri_encode(secret);
    let message = uri_encode(&payload);

    let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes())
        .map_err(|e| VeryfiError::InvalidRequest(format!("invalid signing key: {e}")))?;
    mac.update(message.as_bytes());

    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, &URI_ENCODE_SET).to_string()
}

/// String coercion of a value inside the payload.
///
/// Arrays are their elements joined by `,` (nulls render empty), objects are
/// a fixed placeholder and whole floats drop their fraction.
fn coerce(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => coerce_float(f),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => OBJECT_PLACEHOLDER.to_string(),
    }
}

/// Number formatting as done by `Number.prototype.toString`: plain decimal
/// for magnitudes in `[1e-6, 1e21)`, exponent form with an explicit sign
/// otherwise, and `-0` printed as `0`.
fn coerce_float(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if !f.is_finite() {
        return match f {
            f if f.is_nan() => "NaN".to_string(),
            f if f > 0.0 => "Infinity".to_string(),
            _ => "-Infinity".to_string(),
        };
    }

    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        // f64 Display is the shortest round-trip decimal and never uses an exponent.
        return f.to_string();
    }

    let formatted = format!("{:e}", f);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::FileUpload;
    use serde_json::json;

    const TS: i64 = 1_700_000_000_000;

    fn receipt_args() -> RequestArguments {
        RequestArguments::new()
            .with("file_name", "receipt.png")
            .with("auto_delete", false)
            .with("categories", json!(["Travel", "Meals & Entertainment"]))
    }

    #[test]
    fn test_payload_format() {
        assert_eq!(
            signing_payload(&receipt_args(), TS),
            "timestamp:1700000000000,file_name:receipt.png,auto_delete:false,\
             categories:Travel,Meals & Entertainment"
        );
    }

    #[test]
    fn test_payload_without_arguments() {
        assert_eq!(
            signing_payload(&RequestArguments::new(), 42),
            "timestamp:42"
        );
    }

    #[test]
    fn test_known_signature() {
        let sig = generate_signature("secret", &receipt_args(), TS).unwrap();
        assert_eq!(sig, "sIu2SFGGEEte9JrO+NT2UB3+cLmrhGM0ncOK30ppWQ4=");
    }

    #[test]
    fn test_secret_is_uri_encoded() {
        let args = RequestArguments::new().with("id", 42);
        let sig = generate_signature("s3cr3t é", &args, TS).unwrap();
        assert_eq!(sig, "Ajf8bfgrYFKssCXCnBAy6ABDYYxNiNnLZ9SK0vTeQBs=");
    }

    #[test]
    fn test_signature_is_deterministic() {
        let a = generate_signature("secret", &receipt_args(), TS).unwrap();
        let b = generate_signature("secret", &receipt_args(), TS).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_sensitivity() {
        let base = generate_signature("secret", &receipt_args(), TS).unwrap();

        let other_secret = generate_signature("secret2", &receipt_args(), TS).unwrap();
        assert_ne!(base, other_secret);

        let other_ts = generate_signature("secret", &receipt_args(), TS + 1).unwrap();
        assert_ne!(base, other_ts);

        let mut changed = receipt_args();
        changed.insert("auto_delete", true);
        let other_value = generate_signature("secret", &changed, TS).unwrap();
        assert_ne!(base, other_value);
    }

    #[test]
    fn test_argument_order_matters() {
        let ab = RequestArguments::new().with("a", 1).with("b", 2);
        let ba = RequestArguments::new().with("b", 2).with("a", 1);
        assert_ne!(
            generate_signature("secret", &ab, TS).unwrap(),
            generate_signature("secret", &ba, TS).unwrap()
        );
    }

    #[test]
    fn test_uri_encode() {
        assert_eq!(uri_encode("timestamp:1,a:b c,d:ü"), "timestamp:1,a:b%20c,d:%C3%BC");
        assert_eq!(uri_encode("a&b=c?d#e"), "a&b=c?d#e");
    }

    #[test]
    fn test_coerce() {
        assert_eq!(coerce(&json!(null)), "null");
        assert_eq!(coerce(&json!(true)), "true");
        assert_eq!(coerce(&json!(50)), "50");
        assert_eq!(coerce(&json!(1.5)), "1.5");
        assert_eq!(coerce(&json!(2.0)), "2");
        assert_eq!(coerce(&json!("x y")), "x y");
        assert_eq!(coerce(&json!([1, null, "a"])), "1,,a");
        assert_eq!(coerce(&json!([[1, 2], [3]])), "1,2,3");
        assert_eq!(coerce(&json!({"k": "v"})), "[object Object]");
        assert_eq!(coerce(&json!([])), "");
    }

    #[test]
    fn test_file_argument_placeholder() {
        let mut args = RequestArguments::new().with("file_name", "a.png");
        args.insert_file("file", FileUpload::from_bytes("a.png", vec![0u8; 4]));
        assert_eq!(
            signing_payload(&args, 1),
            "timestamp:1,file_name:a.png,file:[object Object]"
        );
    }

    #[test]
    fn test_float_coercion_matches_number_to_string() {
        assert_eq!(coerce(&json!(1.5)), "1.5");
        assert_eq!(coerce(&json!(20.0)), "20");
        assert_eq!(coerce(&json!(0.000001)), "0.000001");
        assert_eq!(coerce(&json!(1e-7)), "1e-7");
        assert_eq!(coerce(&json!(1.5e-7)), "1.5e-7");
        assert_eq!(coerce(&json!(1e21)), "1e+21");
        assert_eq!(coerce(&json!(-2.5e22)), "-2.5e+22");
        assert_eq!(coerce(&json!(1e20)), "100000000000000000000");
        assert_eq!(coerce(&json!(-0.0)), "0");
    }
}
