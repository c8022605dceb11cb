//! Signed query parameters for the translate endpoint.
//!
//! `sign = md5_hex(appid + q + salt + secret_key)`, with the query text used
//! exactly as submitted.

use md5::{Digest, Md5};
use rand::Rng;
use serde::Serialize;

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::lang::Lang;

const SALT_RANGE: std::ops::Range<u32> = 32768..65536;

/// Serializes as the endpoint's query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    pub q: String,
    pub from: Lang,
    pub to: Lang,
    pub appid: String,
    pub salt: String,
    pub sign: String,
}

pub fn generate_salt() -> String {
    rand::rng().random_range(SALT_RANGE).to_string()
}

pub fn sign(app_id: &str, query: &str, salt: &str, secret_key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(app_id.as_bytes());
    hasher.update(query.as_bytes());
    hasher.update(salt.as_bytes());
    hasher.update(secret_key.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn build(query: &str, from: Lang, to: Lang, credentials: &Credentials) -> Result<TranslationRequest> {
    build_with_salt(query, from, to, credentials, generate_salt())
}

pub fn build_with_salt(
    query: &str,
    from: Lang,
    to: Lang,
    credentials: &Credentials,
    salt: String,
) -> Result<TranslationRequest> {
    credentials.ensure_complete()?;
    if query.trim().is_empty() {
        return Err(Error::EmptyQuery);
    }

    let sign = sign(&credentials.app_id, query, &salt, &credentials.secret_key);
    Ok(TranslationRequest {
        q: query.to_string(),
        from,
        to,
        appid: credentials.app_id.clone(),
        salt,
        sign,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("id1", "key1")
    }

    #[test]
    fn sign_concatenates_in_fixed_order() {
        // md5("id1hello50000key1")
        assert_eq!(
            sign("id1", "hello", "50000", "key1"),
            "6bb7def66243c932688120f199d864d2"
        );
    }

    #[test]
    fn sign_matches_provider_sample() {
        assert_eq!(
            sign("2015063000000001", "apple", "1435660288", "12345678"),
            "f89f9594663708c1605f3d736d01d2d4"
        );
    }

    #[test]
    fn build_produces_salt_in_range_and_hex_sign() {
        for _ in 0..200 {
            let req = build("hello", Lang::Auto, Lang::Zh, &creds()).unwrap();
            let salt: u32 = req.salt.parse().unwrap();
            assert!(SALT_RANGE.contains(&salt), "salt {salt} out of range");
            assert_eq!(req.sign.len(), 32);
            assert!(req
                .sign
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
            assert_eq!(req.sign, sign("id1", "hello", &req.salt, "key1"));
        }
    }

    #[test]
    fn build_with_salt_is_deterministic() {
        let req = build_with_salt("hello", Lang::En, Lang::Zh, &creds(), "50000".into()).unwrap();
        assert_eq!(req.sign, "6bb7def66243c932688120f199d864d2");
        assert_eq!(req.appid, "id1");
        assert_eq!(req.q, "hello");
        assert_eq!(req.from, Lang::En);
        assert_eq!(req.to, Lang::Zh);
    }

    #[test]
    fn query_is_signed_raw() {
        let a = build_with_salt(" hello", Lang::En, Lang::Zh, &creds(), "50000".into()).unwrap();
        let b = build_with_salt("Hello", Lang::En, Lang::Zh, &creds(), "50000".into()).unwrap();
        assert_ne!(a.sign, "6bb7def66243c932688120f199d864d2");
        assert_ne!(b.sign, "6bb7def66243c932688120f199d864d2");
        assert_eq!(a.q, " hello");
    }

    #[test]
    fn rejects_incomplete_credentials() {
        let err = build("hello", Lang::En, Lang::Zh, &Credentials::new("", "key1")).unwrap_err();
        assert_eq!(err, Error::InvalidCredentials);
        let err = build("hello", Lang::En, Lang::Zh, &Credentials::new("id1", "")).unwrap_err();
        assert_eq!(err, Error::InvalidCredentials);
    }

    #[test]
    fn rejects_blank_query() {
        assert_eq!(
            build("", Lang::En, Lang::Zh, &creds()).unwrap_err(),
            Error::EmptyQuery
        );
        assert_eq!(
            build(" \n\t", Lang::En, Lang::Zh, &creds()).unwrap_err(),
            Error::EmptyQuery
        );
    }

    #[test]
    fn query_params_use_provider_names() {
        let req = build_with_salt("hi", Lang::Auto, Lang::ZhTw, &creds(), "40000".into()).unwrap();
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["q"], "hi");
        assert_eq!(value["from"], "auto");
        assert_eq!(value["to"], "zh-TW");
        assert_eq!(value["appid"], "id1");
        assert_eq!(value["salt"], "40000");
    }
}
