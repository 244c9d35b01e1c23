//! Deferred ("token") values.
//!
//! Many fields of the emitted resource graph — api ids, endpoints,
//! integration ids — are not known until the host framework resolves the
//! template. They are modeled as opaque handles that compare by identity,
//! never by textual content, and serialize into the CloudFormation intrinsic
//! (`Ref` / `Fn::GetAtt`) that resolves them at deploy time.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// What a token resolves to once the template is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Reference {
    /// `{"Ref": logicalId}`
    Ref(String),
    /// `{"Fn::GetAtt": [logicalId, attribute]}`
    GetAtt(String, &'static str),
    /// `{"Ref": pseudoParameter}`, e.g. `AWS::Region`
    Pseudo(&'static str),
}

/// An opaque deferred value.
///
/// Equality and hashing use the token's identity only: two tokens are equal
/// exactly when one is a clone of the other. Arithmetic and substring
/// operations are unrepresentable by design.
#[derive(Debug, Clone)]
pub struct Token {
    identity: Uuid,
    reference: Reference,
}

impl Token {
    pub(crate) fn reference<S: Into<String>>(logical_id: S) -> Self {
        Self { identity: Uuid::new_v4(), reference: Reference::Ref(logical_id.into()) }
    }

    pub(crate) fn get_att<S: Into<String>>(logical_id: S, attribute: &'static str) -> Self {
        Self { identity: Uuid::new_v4(), reference: Reference::GetAtt(logical_id.into(), attribute) }
    }

    pub(crate) fn pseudo(name: &'static str) -> Self {
        Self { identity: Uuid::new_v4(), reference: Reference::Pseudo(name) }
    }

    /// The `AWS::Region` pseudo parameter.
    pub fn region() -> Self {
        Self::pseudo("AWS::Region")
    }

    /// Canonical placeholder used in dedup keys and display strings. Clones
    /// share an identity, so structurally equal records that embed the same
    /// token produce the same canonical form. Pseudo parameters render by
    /// name; every `AWS::Region` token resolves to the same value.
    pub(crate) fn canonical(&self) -> String {
        match &self.reference {
            Reference::Pseudo(name) => format!("${{{}}}", name),
            _ => format!("${{Token[{}]}}", self.identity.simple()),
        }
    }

}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for Token {}

impl std::hash::Hash for Token {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match &self.reference {
            Reference::Ref(id) => map.serialize_entry("Ref", id)?,
            Reference::Pseudo(name) => map.serialize_entry("Ref", name)?,
            Reference::GetAtt(id, attribute) => {
                map.serialize_entry("Fn::GetAtt", &[id.as_str(), attribute])?
            }
        }
        map.end()
    }
}

/// A string-typed property value that may embed deferred tokens.
///
/// Serializes to a plain JSON string when fully literal, or to an
/// `Fn::Join` intrinsic when any part is deferred.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StringValue {
    Literal(String),
    Token(Token),
    Join(Vec<StringValue>),
}

impl StringValue {
    /// Concatenate parts into a single value, collapsing nested joins.
    pub fn join<I: IntoIterator<Item = StringValue>>(parts: I) -> Self {
        let mut flat = Vec::new();
        for part in parts {
            match part {
                StringValue::Join(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        StringValue::Join(flat)
    }

    /// Canonical rendering used for structural comparison and dedup digests.
    /// Tokens contribute their identity, not their resolved content.
    pub(crate) fn canonical(&self) -> String {
        match self {
            StringValue::Literal(s) => s.clone(),
            StringValue::Token(t) => t.canonical(),
            StringValue::Join(parts) => parts.iter().map(|p| p.canonical()).collect(),
        }
    }

    fn is_literal(&self) -> bool {
        matches!(self, StringValue::Literal(_))
    }
}

impl From<&str> for StringValue {
    fn from(s: &str) -> Self {
        StringValue::Literal(s.to_string())
    }
}

impl From<String> for StringValue {
    fn from(s: String) -> Self {
        StringValue::Literal(s)
    }
}

impl From<Token> for StringValue {
    fn from(token: Token) -> Self {
        StringValue::Token(token)
    }
}

impl fmt::Display for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl Serialize for StringValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            StringValue::Literal(s) => serializer.serialize_str(s),
            StringValue::Token(t) => t.serialize(serializer),
            StringValue::Join(parts) => {
                if parts.iter().all(|p| p.is_literal()) {
                    return serializer.serialize_str(&self.canonical());
                }
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Join", &("", parts))?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_equality_is_identity() {
        let a = Token::reference("ApiABC123");
        let b = Token::reference("ApiABC123");
        assert_ne!(a, b, "distinct tokens differ even with the same target");
        assert_eq!(a, a.clone(), "clones share an identity");
    }

    #[test]
    fn token_serializes_to_ref() {
        let token = Token::reference("ApiABC123");
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json, serde_json::json!({ "Ref": "ApiABC123" }));
    }

    #[test]
    fn token_serializes_to_get_att() {
        let token = Token::get_att("ApiABC123", "ApiEndpoint");
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json, serde_json::json!({ "Fn::GetAtt": ["ApiABC123", "ApiEndpoint"] }));
    }

    #[test]
    fn region_pseudo_parameter() {
        let json = serde_json::to_value(Token::region()).unwrap();
        assert_eq!(json, serde_json::json!({ "Ref": "AWS::Region" }));
        assert_eq!(Token::region().canonical(), Token::region().canonical());
    }

    #[test]
    fn literal_join_flattens_to_string() {
        let value = StringValue::join(["https://".into(), StringValue::from("example.com")]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, serde_json::json!("https://example.com"));
    }

    #[test]
    fn tokenized_join_serializes_to_fn_join() {
        let token = Token::reference("IntegrationXYZ");
        let value = StringValue::join(["integrations/".into(), token.into()]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "Fn::Join": ["", ["integrations/", { "Ref": "IntegrationXYZ" }]] })
        );
    }

    #[test]
    fn canonical_form_tracks_token_identity() {
        let token = Token::get_att("DomainD", "RegionalDomainName");
        let a = StringValue::join(["prefix-".into(), StringValue::Token(token.clone())]);
        let b = StringValue::join(["prefix-".into(), StringValue::Token(token)]);
        assert_eq!(a.canonical(), b.canonical());

        let other = StringValue::join([
            "prefix-".into(),
            StringValue::Token(Token::get_att("DomainD", "RegionalDomainName")),
        ]);
        assert_ne!(a.canonical(), other.canonical());
    }
}
