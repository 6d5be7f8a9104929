//! Console connector.
//!
//! Stands in for a platform transport: every event it receives is written as
//! one JSON line (`{"connector": ..., "message": ...}`) to a sink shared by
//! every console connector, so lines from concurrent events never interleave.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::info;

use crate::common::error::{ConnectorError, ConnectorResult};
use crate::common::segment::display_message;
use crate::common::ProcessedInfo;

use super::manager::Connector;

#[derive(Serialize)]
struct OutboundLine<'a> {
    connector: &'a str,
    message: &'a ProcessedInfo,
}

/// Output handle shared between console connectors.
pub type SharedSink = Arc<Mutex<Box<dyn AsyncWrite + Send + Unpin>>>;

/// Wrap a writer for sharing between connectors.
pub fn shared_sink(writer: impl AsyncWrite + Send + Unpin + 'static) -> SharedSink {
    Arc::new(Mutex::new(Box::new(writer)))
}

/// Connector writing outbound events as JSON lines.
pub struct ConsoleConnector {
    name: String,
    enabled: AtomicBool,
    sink: SharedSink,
}

impl ConsoleConnector {
    pub fn new(name: impl Into<String>, enabled: bool, sink: SharedSink) -> Self {
        Self {
            name: name.into(),
            enabled: AtomicBool::new(enabled),
            sink,
        }
    }

    fn send_failed(&self, err: std::io::Error) -> ConnectorError {
        ConnectorError::SendFailed {
            name: self.name.clone(),
            message: err.to_string(),
        }
    }

    #[allow(dead_code)]
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

#[async_trait]
impl Connector for ConsoleConnector {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    async fn send_message(&self, info: &ProcessedInfo) -> ConnectorResult<()> {
        let mut line = serde_json::to_vec(&OutboundLine {
            connector: &self.name,
            message: info,
        })?;
        line.push(b'\n');

        {
            let mut sink = self.sink.lock().await;
            sink.write_all(&line)
                .await
                .map_err(|e| self.send_failed(e))?;
            sink.flush().await.map_err(|e| self.send_failed(e))?;
        }

        info!(
            connector = %self.name,
            sender = %info.sender,
            "Delivered: {}",
            display_message(&info.processed_message)
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    use crate::common::messages::EventSource;
    use crate::common::Segment;

    fn make_info() -> ProcessedInfo {
        ProcessedInfo {
            processed_message: vec![Segment::text("hello world")],
            source: EventSource::new("QQ"),
            source_id: "123456".to_string(),
            sender: "Alex".to_string(),
            sender_id: "10001".to_string(),
            raw: serde_json::json!({"message_id": 7}),
            server: Some("survival".to_string()),
            event_sub_type: "group".to_string(),
            logger: tracing::Span::none(),
        }
    }

    #[tokio::test]
    async fn test_writes_json_line() {
        let (writer, mut reader) = tokio::io::duplex(4096);
        let connector = ConsoleConnector::new("Minecraft", true, shared_sink(writer));

        connector.send_message(&make_info()).await.unwrap();
        drop(connector);

        let mut out = String::new();
        reader.read_to_string(&mut out).await.unwrap();
        assert!(out.ends_with('\n'));

        let line: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(line["connector"], "Minecraft");
        assert_eq!(
            line["message"]["processed_message"][0]["data"]["text"],
            "hello world"
        );
        assert_eq!(line["message"]["sender_id"], "10001");
        assert_eq!(line["message"]["raw"]["message_id"], 7);
    }

    #[tokio::test]
    async fn test_connectors_share_one_sink() {
        let (writer, mut reader) = tokio::io::duplex(64 * 1024);
        let sink = shared_sink(writer);
        let qq = ConsoleConnector::new("QQ", true, sink.clone());
        let mc = ConsoleConnector::new("Minecraft", true, sink);
        let info = make_info();

        let sends = (0..20).map(|i| {
            let connector = if i % 2 == 0 { &qq } else { &mc };
            connector.send_message(&info)
        });
        for result in futures::future::join_all(sends).await {
            result.unwrap();
        }
        drop(qq);
        drop(mc);

        let mut out = String::new();
        reader.read_to_string(&mut out).await.unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 20);
        assert_eq!(lines.iter().filter(|l| l["connector"] == "QQ").count(), 10);
    }

    #[tokio::test]
    async fn test_closed_sink_reports_connector_name() {
        let (writer, reader) = tokio::io::duplex(64);
        drop(reader);
        let connector = ConsoleConnector::new("Minecraft", true, shared_sink(writer));

        let err = connector.send_message(&make_info()).await.unwrap_err();
        assert!(
            matches!(err, ConnectorError::SendFailed { ref name, .. } if name == "Minecraft")
        );
    }

    #[test]
    fn test_enabled_flag() {
        let connector = ConsoleConnector::new("QQ", true, shared_sink(tokio::io::sink()));
        assert!(connector.is_enabled());
        connector.set_enabled(false);
        assert!(!connector.is_enabled());
    }
}
