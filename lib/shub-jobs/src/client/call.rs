use headers::{ContentType, HeaderMapExt};
use http::header::AUTHORIZATION;
use http::{Method, StatusCode};
use indexmap::IndexMap;
use reqwest::{Body, Request};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;
use url::form_urlencoded;

use super::{ApiResponse, JobsClient, Outcome};
use crate::schema::{Arguments, Operation, OperationSchema, Shape, ValidationError};

impl JobsClient {
    /// Validates the arguments, then performs exactly one exchange.
    pub(super) async fn exchange(
        &self,
        operation: Operation,
        arguments: Arguments,
    ) -> Result<Outcome, ValidationError> {
        let schema = operation.schema();
        if let Err(error) = schema.validate(&arguments) {
            debug!(%operation, %error, "arguments rejected");
            return Err(error);
        }

        let fields = encode_fields(schema, &arguments);
        let request = self.build_request(operation, &fields);

        Ok(self.send(operation, request).await)
    }

    pub(super) fn endpoint(&self, operation: Operation) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}{}", url.path().trim_end_matches('/'), operation.path());
        url.set_path(&path);
        url
    }

    pub(super) fn build_request(&self, operation: Operation, fields: &[(String, String)]) -> Request {
        let method = operation.method();
        let mut url = self.endpoint(operation);
        let in_query = method == Method::GET;
        if in_query && !fields.is_empty() {
            url.query_pairs_mut().extend_pairs(fields);
        }

        let mut request = Request::new(method, url);
        request
            .headers_mut()
            .insert(AUTHORIZATION, self.authorization.clone());

        if !in_query {
            let body = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(fields)
                .finish();
            request
                .headers_mut()
                .typed_insert(ContentType::form_url_encoded());
            *request.body_mut() = Some(Body::from(body));
        }

        request
    }

    async fn send(&self, operation: Operation, request: Request) -> Outcome {
        debug!(?request, "sending...");
        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                warn!(%operation, %error, "transport failure");
                return Outcome::TransportFailure(error.into());
            }
        };
        debug!(?response, "...receiving");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(%operation, %status, %error, "fail to read response body");
                return Outcome::TransportFailure(error.into());
            }
        };
        let response = ApiResponse::new(status, headers, &bytes);

        if status == StatusCode::OK {
            Outcome::Success(response)
        } else {
            debug!(%operation, %status, message = ?response.message(), "rejected");
            Outcome::Rejection(response)
        }
    }
}

/// Flattens validated arguments into ordered `(name, value)` wire pairs.
///
/// Lists become repeated pairs in input order. Fields declared as
/// [`Shape::TextMap`] are not sent themselves: each of their entries becomes a
/// top-level field, replacing a declared field of the same name in place.
pub(in crate::client) fn encode_fields(
    schema: &OperationSchema,
    arguments: &Arguments,
) -> Vec<(String, String)> {
    let mut fields = IndexMap::<String, Vec<String>>::new();
    let mut flattened = Vec::new();

    for (key, value) in arguments.iter() {
        let is_map = schema
            .field(key)
            .is_some_and(|field| field.shape == Shape::TextMap);
        match value {
            Value::Object(entries) if is_map => flattened.extend(entries),
            value => {
                fields.insert(key.to_string(), wire_values(value));
            }
        }
    }
    for (key, value) in flattened {
        fields.insert(key.clone(), wire_values(value));
    }

    fields
        .into_iter()
        .flat_map(|(key, values)| values.into_iter().map(move |value| (key.clone(), value)))
        .collect()
}

fn wire_values(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) => vec![text.clone()],
        Value::Array(items) => items.iter().flat_map(wire_values).collect(),
        Value::Null => vec![],
        other => vec![other.to_string()],
    }
}
