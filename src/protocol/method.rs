//! Closed set of methods the server dispatches on.

/// Supported protocol methods. Adding a method means adding a variant and
/// letting the compiler point at every match that must handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Initialize,
    ToolsList,
    ToolsCall,
    ResourcesList,
    PromptsList,
}

impl Method {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "initialize" => Some(Method::Initialize),
            "tools/list" => Some(Method::ToolsList),
            "tools/call" => Some(Method::ToolsCall),
            "resources/list" => Some(Method::ResourcesList),
            "prompts/list" => Some(Method::PromptsList),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Initialize => "initialize",
            Method::ToolsList => "tools/list",
            Method::ToolsCall => "tools/call",
            Method::ResourcesList => "resources/list",
            Method::PromptsList => "prompts/list",
        }
    }
}
