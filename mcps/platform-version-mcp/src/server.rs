//! MCP Server implementation for platform version queries

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::channel::ChannelRouter;
use crate::config::ResponderConfig;
use crate::error::{ConfigError, ToolCallError};
use crate::host::SysinfoHost;
use crate::responder::MethodCall;

const DESCRIPTION: &str = "Platform Version MCP Server - answers requests on named channels \
                           with the host platform name and OS version.";

/// The main Platform Version MCP Server
#[derive(Clone)]
pub struct PlatformVersionMcpServer {
    router: Arc<ChannelRouter>,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Parameter Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct InvokeChannelParams {
    #[schemars(description = "Name of a registered channel")]
    pub channel: String,

    #[schemars(description = "Method name; accepted but does not change the answer")]
    pub method: Option<String>,

    #[schemars(description = "Call arguments; accepted but does not change the answer")]
    pub arguments: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ChannelList<'a> {
    platform_name: &'a str,
    channels: &'a [String],
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl PlatformVersionMcpServer {
    pub fn new(router: ChannelRouter) -> Self {
        Self {
            router: Arc::new(router),
            tool_router: Self::tool_router(),
        }
    }

    /// Build a server reading the real host, configured from file and environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_config(&ResponderConfig::load()?)
    }

    pub fn from_config(config: &ResponderConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.build_router(Arc::new(SysinfoHost))?))
    }

    pub fn router(&self) -> &ChannelRouter {
        &self.router
    }

    #[tool(description = "Get the host platform name and OS version, e.g. \"iOS 17.4\"")]
    async fn get_platform_version(&self) -> Result<CallToolResult, McpError> {
        let version = self.router.responder().get_platform_version()?;
        Ok(CallToolResult::success(vec![Content::text(
            version.into_string(),
        )]))
    }

    #[tool(
        description = "Send a method call on a named channel. Every registered channel answers with the platform version string."
    )]
    async fn invoke_channel(
        &self,
        Parameters(params): Parameters<InvokeChannelParams>,
    ) -> Result<CallToolResult, McpError> {
        let call = MethodCall::new(
            params.method.unwrap_or_default(),
            params.arguments.unwrap_or(Value::Null),
        );
        let version = self.router.dispatch(&params.channel, &call)?;
        Ok(CallToolResult::success(vec![Content::text(
            version.into_string(),
        )]))
    }

    #[tool(description = "List the registered channel names and the configured platform name")]
    async fn list_channels(&self) -> Result<CallToolResult, McpError> {
        let list = ChannelList {
            platform_name: self.router.responder().platform_name(),
            channels: self.router.channels(),
        };
        let json = serde_json::to_string_pretty(&list)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for PlatformVersionMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(DESCRIPTION.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// In-process Tool Calls
// ============================================================================

impl PlatformVersionMcpServer {
    pub fn server_name(&self) -> &str {
        "platform-version"
    }

    pub fn server_description(&self) -> &str {
        DESCRIPTION
    }

    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    /// Call a tool by name without going through a transport
    pub async fn call_tool(&self, name: &str, params: Value) -> Result<CallToolResult, ToolCallError> {
        match name {
            "get_platform_version" => self.get_platform_version().await.map_err(Into::into),

            "invoke_channel" => {
                let params: InvokeChannelParams = serde_json::from_value(params)?;
                self.invoke_channel(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "list_channels" => self.list_channels().await.map_err(Into::into),

            _ => Err(ToolCallError::ToolNotFound(name.to_string())),
        }
    }
}
