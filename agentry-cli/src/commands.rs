//! Subcommand handlers. Each returns the JSON document printed to stdout.

use agentry::core::{ExecutionContext, Message, MessageType};
use agentry::runtime::AgentInfo;
use serde_json::{Value, json};
use std::collections::HashMap;

use crate::app::App;
use crate::error::CliError;

pub fn list_agents(app: &App) -> Result<Value, CliError> {
    let agents: Vec<AgentInfo> = app
        .registry
        .list_all()
        .iter()
        .map(|agent| AgentInfo::of(agent.as_ref()))
        .collect();
    let stats = app.dispatch.statistics();

    Ok(json!({
        "agents": agents,
        "statistics": {
            "total": stats.total,
            "available": stats.available,
            "unavailable": stats.unavailable,
            "availability_percentage": stats.availability_percentage(),
        },
    }))
}

pub struct SendArgs<'a> {
    pub agent: &'a str,
    pub kind: MessageType,
    pub from: &'a str,
    pub session: Option<&'a str>,
    pub content: &'a str,
}

pub async fn send(app: &App, args: SendArgs<'_>) -> Result<Value, CliError> {
    let agent = app
        .dispatch
        .resolve(args.agent)
        .ok_or_else(|| CliError::UnknownAgent(args.agent.to_string()))?;

    let message = Message::builder(args.kind, args.content)
        .sender(args.from)
        .receiver(agent.id())
        .build();
    let mut context = ExecutionContext::new()
        .with_user(args.from)
        .with_agent(agent.id());
    if let Some(session) = args.session {
        context = context.with_session(session);
    }

    let reply = app.dispatch.process(agent.id(), &message, &mut context).await?;
    Ok(serde_json::to_value(reply)?)
}

pub fn list_tools(app: &App) -> Result<Value, CliError> {
    Ok(json!({ "tools": app.tools.list() }))
}

pub async fn run_tool(app: &App, name: &str, params: &[String]) -> Result<Value, CliError> {
    let parameters = params
        .iter()
        .map(|raw| parse_param(raw))
        .collect::<Result<HashMap<_, _>, _>>()?;
    let result = app
        .tools
        .invoke(name, parameters, &ExecutionContext::new())
        .await?;
    Ok(serde_json::to_value(result)?)
}

/// Split `key=value`. Values that parse as JSON keep their type, the rest
/// become strings.
pub fn parse_param(raw: &str) -> Result<(String, Value), CliError> {
    let (key, value) = raw
        .split_once('=')
        .filter(|(key, _)| !key.trim().is_empty())
        .ok_or_else(|| CliError::InvalidArgument(format!("expected key=value, got '{raw}'")))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.trim().to_string(), value))
}

pub fn parse_kind(raw: &str) -> Result<MessageType, String> {
    MessageType::from_name(raw).ok_or_else(|| format!("unknown message type '{raw}'"))
}
