use crate::adapters::xmlrpc::{parse_response, MethodCall, MethodResponse, Value};
use crate::domain::model::{PostId, PostRequest, PublishReceipt, SiteConfig};
use crate::domain::ports::Publisher;
use crate::utils::error::{PresserError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// WordPress ignores the blog id on single-site installs.
pub const BLOG_ID: i64 = 0;

const NEW_POST_METHOD: &str = "wp.newPost";
const FAULT_INVALID_CREDENTIALS: i64 = 403;

pub struct WordPressClient {
    http: Client,
    endpoint: String,
    username: String,
    password: String,
}

impl WordPressClient {
    /// Builds the client and checks that the endpoint speaks XML-RPC and
    /// offers `wp.newPost`.
    pub async fn connect(site: &SiteConfig, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("presser/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = Self {
            http: builder.build()?,
            endpoint: site.endpoint.clone(),
            username: site.username.clone(),
            password: site.password.clone(),
        };

        let methods = client
            .call(&MethodCall::new("mt.supportedMethods", Vec::new()))
            .await
            .map_err(|e| match e {
                PresserError::ConnectionError { .. } | PresserError::InvalidCredentialsError { .. } => e,
                other => client.connection_error(other.to_string()),
            })?;

        let supported = match &methods {
            Value::Array(items) => items.iter().any(|m| m.as_str() == Some(NEW_POST_METHOD)),
            _ => false,
        };
        if !supported {
            return Err(client.connection_error(format!("endpoint does not offer {}", NEW_POST_METHOD)));
        }

        tracing::info!("Connected to {}", client.endpoint);
        Ok(client)
    }

    async fn call(&self, call: &MethodCall) -> Result<Value> {
        tracing::debug!("Calling {} on {}", call.method, self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml")
            .body(call.to_xml())
            .send()
            .await
            .map_err(|e| self.connection_error(e.to_string()))?;

        let status = response.status();
        tracing::debug!("XML-RPC response status: {}", status);
        if !status.is_success() {
            return Err(self.connection_error(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.connection_error(e.to_string()))?;

        match parse_response(&body)? {
            MethodResponse::Success(value) => Ok(value),
            MethodResponse::Fault { code, message } if code == FAULT_INVALID_CREDENTIALS => {
                Err(PresserError::InvalidCredentialsError { message })
            }
            MethodResponse::Fault { code, message } => Err(PresserError::RemoteFaultError { code, message }),
        }
    }

    fn connection_error(&self, reason: String) -> PresserError {
        PresserError::ConnectionError {
            endpoint: self.endpoint.clone(),
            reason,
        }
    }
}

#[async_trait]
impl Publisher for WordPressClient {
    async fn publish(&self, post: &PostRequest) -> Result<PublishReceipt> {
        let content = Value::Struct(vec![
            ("post_title".to_string(), Value::String(post.title.clone())),
            ("post_content".to_string(), Value::String(post.content.clone())),
            ("post_status".to_string(), Value::String(post.status.as_str().to_string())),
        ]);
        let call = MethodCall::new(
            NEW_POST_METHOD,
            vec![
                Value::Int(BLOG_ID),
                Value::String(self.username.clone()),
                Value::String(self.password.clone()),
                content,
            ],
        );

        let id = match self.call(&call).await? {
            Value::String(id) => id,
            Value::Int(id) => id.to_string(),
            other => {
                return Err(PresserError::XmlRpcError {
                    message: format!("unexpected {} result: {:?}", NEW_POST_METHOD, other),
                })
            }
        };

        Ok(PublishReceipt::Created(PostId(id)))
    }
}
