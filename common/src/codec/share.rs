//! Share codes: one store's count packed into a single line of text.
//!
//! A BA finishes a store, sends the code over a chat app, and the BDE pastes
//! it into their own session. There is no acknowledgment channel, so decoding
//! has to survive whatever the copy-paste did to the text: a label in front
//! of the code, surrounding whitespace, line wrapping inside the code, a lost
//! `=` padding tail. Anything that still does not decode is reported as
//! `None`, never as a panic or an error the caller has to handle.
//!
//! Wire form: standard base64 of the UTF-8 JSON
//! `{"store": {...}, "entries": [[sku, count], ...], "timestamp": ms}` with
//! only positive counts in `entries`.

use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::pairs;
use crate::model::stock::StockCountMap;
use crate::model::store::Store;

/// Label placed in front of the code in hand-off messages. Everything up to
/// the last occurrence is discarded when decoding.
pub const SHARE_MARKER: &str = "CODE:";

#[derive(Serialize)]
struct OutgoingPayload<'a> {
    store: &'a Store,
    #[serde(with = "pairs")]
    entries: StockCountMap,
    timestamp: i64,
}

#[derive(Deserialize)]
struct IncomingPayload {
    store: Option<Value>,
    #[serde(alias = "data")]
    entries: Option<Value>,
    timestamp: Option<Value>,
}

/// A decoded share code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub store: Store,
    /// Positive counts only.
    pub stock_data: StockCountMap,
    /// When the code was generated, if the sender included it.
    pub timestamp: Option<i64>,
}

/// Encodes `store` and the positive entries of `stock` into a share code.
pub fn encode(store: &Store, stock: &StockCountMap, timestamp: i64) -> String {
    let payload = OutgoingPayload {
        store,
        entries: stock.filled(),
        timestamp,
    };
    match serde_json::to_string(&payload) {
        Ok(json) => general_purpose::STANDARD.encode(json.as_bytes()),
        Err(e) => {
            log::warn!("failed to build share code for store {}: {e}", store.bsrn);
            String::new()
        }
    }
}

/// Decodes a share code, tolerating surrounding prose and whitespace.
pub fn decode(text: &str) -> Option<SharePayload> {
    let cleaned = clean(text)?;
    let bytes = general_purpose::STANDARD
        .decode(cleaned.as_bytes())
        .or_else(|_| general_purpose::STANDARD_NO_PAD.decode(cleaned.trim_end_matches('=')))
        .map_err(|e| log::warn!("share code is not valid base64: {e}"))
        .ok()?;
    let json = String::from_utf8(bytes)
        .map_err(|e| log::warn!("share code is not UTF-8: {e}"))
        .ok()?;
    let payload: IncomingPayload = serde_json::from_str(&json)
        .map_err(|e| log::warn!("share code is not a valid payload: {e}"))
        .ok()?;

    let (Some(store), Some(entries)) = (payload.store, payload.entries) else {
        log::warn!("share code is missing its store or entries");
        return None;
    };
    let store: Store = serde_json::from_value(store)
        .map_err(|e| log::warn!("share code carries an unreadable store: {e}"))
        .ok()?;
    if store.bsrn.trim().is_empty() {
        log::warn!("share code carries a store without a bsrn");
        return None;
    }
    let stock_data = pairs::from_value(&entries).filled();
    let timestamp = payload.timestamp.as_ref().and_then(Value::as_i64);

    Some(SharePayload {
        store,
        stock_data,
        timestamp,
    })
}

/// Message text for handing a code over by chat or email. [`decode`] accepts
/// the whole message as pasted.
pub fn share_message(store: &Store, token: &str) -> String {
    format!(
        "Stock count for {} ({})\n{}{}",
        store.name, store.bsrn, SHARE_MARKER, token
    )
}

/// Strips any label before the marker and every whitespace character left
/// inside the code by line wrapping.
fn clean(text: &str) -> Option<String> {
    let marker = Regex::new(&format!(r"(?s)^.*{}", regex::escape(SHARE_MARKER))).ok()?;
    let without_label = marker.replace(text.trim(), "");
    let code: String = without_label
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if code.is_empty() {
        log::warn!("share code is empty");
        return None;
    }
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        Store {
            id: "local-1".into(),
            bsrn: "S1".into(),
            name: "Salón Belleza 美".into(),
            location: None,
        }
    }

    fn stock(pairs: &[(&str, u32)]) -> StockCountMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn round_trip_keeps_only_positive_entries() {
        let counts = stock(&[("SKU1", 3), ("SKU2", 0), ("SKU3", 12)]);
        let token = encode(&store(), &counts, 1_700_000_000_000);
        let decoded = decode(&token).unwrap();
        assert_eq!(decoded.store, store());
        assert_eq!(decoded.stock_data, counts.filled());
        assert_eq!(decoded.timestamp, Some(1_700_000_000_000));
    }

    #[test]
    fn token_is_single_line_standard_base64() {
        let token = encode(&store(), &stock(&[("SKU1", 3)]), 1);
        assert!(!token.contains('\n'));
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='));
    }

    #[test]
    fn pasted_message_with_label_and_whitespace_decodes() {
        let token = encode(&store(), &stock(&[("SKU1", 3)]), 1);
        let (head, tail) = token.split_at(token.len() / 2);
        let pasted = format!(
            "  Hi sir, see below\n{}\n{}\n{}  \n",
            "Stock count for X (S1)",
            format!("{SHARE_MARKER}{head}"),
            tail
        );
        let decoded = decode(&pasted).unwrap();
        assert_eq!(decoded.stock_data.get("SKU1"), 3);

        let via_helper = decode(&share_message(&store(), &token)).unwrap();
        assert_eq!(via_helper.store.bsrn, "S1");
    }

    #[test]
    fn missing_padding_is_tolerated() {
        let token = encode(&store(), &stock(&[("SKU1", 3)]), 1);
        let trimmed = token.trim_end_matches('=');
        assert!(decode(trimmed).is_some());
    }

    #[test]
    fn corruption_yields_none() {
        assert!(decode("").is_none());
        assert!(decode("   CODE:   ").is_none());
        assert!(decode("not base64 at all!!!").is_none());
        let not_json = general_purpose::STANDARD.encode("hello");
        assert!(decode(&not_json).is_none());
        let no_entries = general_purpose::STANDARD.encode(r#"{"store":{"id":"a","bsrn":"S1","name":"x"}}"#);
        assert!(decode(&no_entries).is_none());
        let no_store = general_purpose::STANDARD.encode(r#"{"entries":[["SKU1",1]]}"#);
        assert!(decode(&no_store).is_none());
        let bad_store = general_purpose::STANDARD.encode(r#"{"store":{"name":"x"},"entries":[]}"#);
        assert!(decode(&bad_store).is_none());
    }

    #[test]
    fn stores_without_bsrn_are_refused() {
        for bsrn in ["", "   "] {
            let blank = Store {
                bsrn: bsrn.into(),
                ..store()
            };
            let token = encode(&blank, &stock(&[("SKU1", 3)]), 1);
            assert!(decode(&token).is_none(), "bsrn {bsrn:?} should be refused");
        }
    }

    #[test]
    fn legacy_data_key_and_negative_counts() {
        let raw = r#"{"store":{"id":1,"bsrn":"S1","name":"x"},"data":[["SKU1",2],["SKU2",-4],["SKU3",0]],"timestamp":5}"#;
        let decoded = decode(&general_purpose::STANDARD.encode(raw)).unwrap();
        assert_eq!(decoded.store.id, "1");
        assert_eq!(decoded.stock_data, stock(&[("SKU1", 2)]));
        assert_eq!(decoded.stock_data.get("SKU2"), 0);
    }
}
