use std::time::Duration;

use async_trait::async_trait;
use model::channel::message::CreateMessage;
use model::channel::{Channel, ChannelType, ThreadArchiveDuration};
use model::guild::Role;
use model::interaction::InteractionResponse;
use model::Snowflake;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use tracing::debug;

use super::MessagingGateway;
use crate::{Error, Result};

const API_BASE: &str = "https://discord.com/api/v10";

/// [`MessagingGateway`] backed by the Discord REST API
pub struct RestClient {
    client: reqwest::Client,
    authorization: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct CreateThreadBody<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    channel_type: ChannelType,
    auto_archive_duration: ThreadArchiveDuration,
    invitable: bool,
}

#[derive(Debug, Serialize)]
struct ModifyChannelBody<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateDmBody {
    recipient_id: Snowflake,
}

impl RestClient {
    pub fn new(token: &str) -> Result<RestClient> {
        Ok(RestClient {
            client: Self::build_http_client()?,
            authorization: format!("Bot {}", token),
            base_url: API_BASE.to_owned(),
        })
    }

    /// Points the client at another host, for proxies
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> RestClient {
        self.base_url = base_url.into();
        self
    }

    pub fn build_http_client() -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(3))
            .use_rustls_tls();

        #[cfg(feature = "compression")]
        {
            builder = builder.gzip(true);
        }

        builder.build().map_err(Into::into)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        // reqwest::Client uses Arcs internally, so cloning keeps the connection pool
        self.client
            .clone()
            .request(method, format!("{}{}", self.base_url, path))
            .header(AUTHORIZATION, &self.authorization)
    }

    async fn execute(req: RequestBuilder) -> Result<Response> {
        let res = req.send().await?;
        let status = res.status();

        if status.is_success() {
            Ok(res)
        } else {
            let body = res.text().await.unwrap_or_default();
            debug!(%status, %body, "Discord returned an error");
            Error::ResponseError(status, body).into()
        }
    }
}

#[async_trait]
impl MessagingGateway for RestClient {
    async fn fetch_channel(&self, channel_id: Snowflake) -> Result<Option<Channel>> {
        let req = self.request(Method::GET, &format!("/channels/{}", channel_id));

        match Self::execute(req).await {
            Ok(res) => Ok(Some(res.json().await?)),
            Err(Error::ResponseError(StatusCode::NOT_FOUND | StatusCode::FORBIDDEN, _)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_thread(&self, parent_id: Snowflake, name: &str) -> Result<Channel> {
        let body = CreateThreadBody {
            name,
            channel_type: ChannelType::GuildPrivateThread,
            auto_archive_duration: ThreadArchiveDuration::Day,
            invitable: false,
        };

        let req = self
            .request(Method::POST, &format!("/channels/{}/threads", parent_id))
            .json(&body);

        Ok(Self::execute(req).await?.json().await?)
    }

    async fn add_thread_member(&self, thread_id: Snowflake, user_id: Snowflake) -> Result<()> {
        let path = format!("/channels/{}/thread-members/{}", thread_id, user_id);
        Self::execute(self.request(Method::PUT, &path)).await?;
        Ok(())
    }

    async fn send_message(&self, channel_id: Snowflake, message: CreateMessage) -> Result<()> {
        let req = self
            .request(Method::POST, &format!("/channels/{}/messages", channel_id))
            .json(&message);

        Self::execute(req).await?;
        Ok(())
    }

    async fn rename_thread(&self, thread_id: Snowflake, name: &str) -> Result<()> {
        let req = self
            .request(Method::PATCH, &format!("/channels/{}", thread_id))
            .json(&ModifyChannelBody { name });

        Self::execute(req).await?;
        Ok(())
    }

    async fn direct_message(&self, user_id: Snowflake, content: &str) -> Result<()> {
        let req = self
            .request(Method::POST, "/users/@me/channels")
            .json(&CreateDmBody {
                recipient_id: user_id,
            });

        let channel: Channel = Self::execute(req).await?.json().await?;
        self.send_message(channel.id, CreateMessage::text(content)).await
    }

    async fn guild_roles(&self, guild_id: Snowflake) -> Result<Vec<Role>> {
        let req = self.request(Method::GET, &format!("/guilds/{}/roles", guild_id));
        Ok(Self::execute(req).await?.json().await?)
    }

    async fn add_member_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> Result<()> {
        let path = format!("/guilds/{}/members/{}/roles/{}", guild_id, user_id, role_id);
        Self::execute(self.request(Method::PUT, &path)).await?;
        Ok(())
    }

    async fn respond(
        &self,
        interaction_id: Snowflake,
        token: &str,
        response: InteractionResponse,
    ) -> Result<()> {
        let path = format!("/interactions/{}/{}/callback", interaction_id, token);
        let req = self.request(Method::POST, &path).json(&response);

        Self::execute(req).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_thread_body() {
        let body = CreateThreadBody {
            name: "Заявка-1",
            channel_type: ChannelType::GuildPrivateThread,
            auto_archive_duration: ThreadArchiveDuration::Day,
            invitable: false,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["type"], 12);
        assert_eq!(json["auto_archive_duration"], 1440);
        assert_eq!(json["invitable"], false);
    }

    #[test]
    fn test_request_url() {
        let client = RestClient::new("abc").unwrap().with_base_url("http://localhost:8080");
        let req = client
            .request(Method::GET, "/guilds/1/roles")
            .build()
            .unwrap();

        assert_eq!(req.url().as_str(), "http://localhost:8080/guilds/1/roles");
        assert_eq!(req.headers()[AUTHORIZATION], "Bot abc");
    }
}
