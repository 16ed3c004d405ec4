use crate::domain::entities::{CommandKind, GraphQlQuery, Method, Request, RequestDescriptor};
use crate::domain::errors::QurlError;
use crate::domain::value_objects::{JsonBody, Url};

/// Assembles a transport-ready [`Request`]
#[derive(Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    url: Option<Url>,
    headers: Vec<(String, String)>,
    body: Option<JsonBody>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a resolved descriptor onto a request, applying the rules of its command family
    pub fn from_descriptor(descriptor: &RequestDescriptor) -> Result<Request, QurlError> {
        let builder = Self::new()
            .url(descriptor.endpoint.clone())
            .headers(&descriptor.headers);

        let builder = match descriptor.kind {
            CommandKind::GraphQl => {
                let query = descriptor
                    .query
                    .as_ref()
                    .ok_or(QurlError::MissingQuerySource)?;
                builder.method(Method::Post).graphql_body(query)?
            }
            CommandKind::Rest => builder.method(descriptor.method),
        };

        builder.bearer_token(descriptor.token.as_deref()).build()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Appends headers as supplied
    pub fn headers(mut self, headers: &[(String, String)]) -> Self {
        self.headers.extend(headers.iter().cloned());
        self
    }

    /// Sets a header, dropping any existing value under the same name regardless of case
    pub fn set_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Adds `Authorization: Bearer <token>` unless the token is absent or empty
    pub fn bearer_token(self, token: Option<&str>) -> Self {
        match token {
            Some(token) if !token.is_empty() => {
                self.set_header("Authorization", format!("Bearer {}", token))
            }
            _ => self,
        }
    }

    pub fn graphql_body(mut self, query: &GraphQlQuery) -> Result<Self, QurlError> {
        self.body = Some(JsonBody::encode(query)?);
        Ok(self.set_header("Content-Type", "application/json"))
    }

    pub fn build(self) -> Result<Request, QurlError> {
        let url = self
            .url
            .ok_or_else(|| QurlError::invalid_url("", "URL is required"))?;

        Ok(Request {
            method: self.method.unwrap_or(Method::Get),
            url,
            headers: self.headers,
            body: self.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Variables;

    fn descriptor(kind: CommandKind, query: Option<&str>, token: Option<&str>) -> RequestDescriptor {
        RequestDescriptor {
            kind,
            method: Method::Get,
            endpoint: Url::new("https://api.example.com/graphql").unwrap(),
            headers: Vec::new(),
            token: token.map(str::to_string),
            query: query.map(|q| GraphQlQuery {
                query: q.to_string(),
                variables: None,
            }),
        }
    }

    #[test]
    fn graphql_body_encodes_null_variables() {
        let request =
            RequestBuilder::from_descriptor(&descriptor(CommandKind::GraphQl, Some("{ me { id } }"), None))
                .unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.body.as_ref().unwrap().0,
            r#"{"query":"{ me { id } }","variables":null}"#
        );
        assert_eq!(request.header("content-type"), Some("application/json"));
    }

    #[test]
    fn graphql_body_encodes_variables() {
        let mut d = descriptor(CommandKind::GraphQl, Some("query($n: Int)"), None);
        d.query.as_mut().unwrap().variables = Some(Variables::parse(r#"{"n":3}"#).unwrap());

        let request = RequestBuilder::from_descriptor(&d).unwrap();
        assert_eq!(
            request.body.unwrap().0,
            r#"{"query":"query($n: Int)","variables":{"n":3}}"#
        );
    }

    #[test]
    fn content_type_overrides_user_header() {
        let mut d = descriptor(CommandKind::GraphQl, Some("{ ping }"), None);
        d.headers = vec![
            ("content-type".into(), "text/plain".into()),
            ("X-Trace".into(), "1".into()),
        ];

        let request = RequestBuilder::from_descriptor(&d).unwrap();
        assert_eq!(
            request.headers,
            vec![
                ("X-Trace".to_string(), "1".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ]
        );
    }

    #[test]
    fn bearer_token_sets_authorization() {
        let request =
            RequestBuilder::from_descriptor(&descriptor(CommandKind::Rest, None, Some("abc123"))).unwrap();
        assert_eq!(request.header("Authorization"), Some("Bearer abc123"));
    }

    #[test]
    fn empty_token_sets_no_authorization() {
        let request = RequestBuilder::new()
            .url(Url::new("https://api.example.com").unwrap())
            .bearer_token(Some(""))
            .build()
            .unwrap();
        assert_eq!(request.header("authorization"), None);
    }

    #[test]
    fn rest_request_has_no_body() {
        let mut d = descriptor(CommandKind::Rest, None, None);
        d.method = Method::Delete;

        let request = RequestBuilder::from_descriptor(&d).unwrap();
        assert_eq!(request.method, Method::Delete);
        assert!(request.body.is_none());
        assert!(request.headers.is_empty());
    }

    #[test]
    fn graphql_without_query_is_rejected() {
        let err = RequestBuilder::from_descriptor(&descriptor(CommandKind::GraphQl, None, None)).unwrap_err();
        assert!(matches!(err, QurlError::MissingQuerySource));
    }

    #[test]
    fn build_requires_url() {
        let err = RequestBuilder::new().build().unwrap_err();
        assert!(matches!(err, QurlError::InvalidUrl { .. }));
    }
}
