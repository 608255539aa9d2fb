//! Thing↔channel connection types: `POST /connect`.

use serde::{Deserialize, Serialize};

/// Request body for `POST /connect`.
///
/// `channel_ids[i]` is connected to `thing_ids[i]`; both arrays must have the
/// same length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ConnectRequest {
    pub channel_ids: Vec<String>,
    pub thing_ids: Vec<String>,
}

impl ConnectRequest {
    /// Iterate over the `(channel_id, thing_id)` pairs this request describes.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.channel_ids
            .iter()
            .map(String::as_str)
            .zip(self.thing_ids.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_wire_names() {
        let req = ConnectRequest {
            channel_ids: vec!["c-1".into()],
            thing_ids: vec!["t-1".into()],
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"channel_ids":["c-1"],"thing_ids":["t-1"]}"#
        );
    }

    #[test]
    fn pairs_are_positional() {
        let req = ConnectRequest {
            channel_ids: vec!["c-1".into(), "c-2".into()],
            thing_ids: vec!["t-1".into(), "t-2".into()],
        };
        let pairs: Vec<_> = req.pairs().collect();
        assert_eq!(pairs, vec![("c-1", "t-1"), ("c-2", "t-2")]);
    }
}
