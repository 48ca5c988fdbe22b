// Node subprocess transport for a locally installed prompt-feedback build
//
// The component ships as a Node package; when no service URL is configured
// the adapter points this transport at its compiled entry (dist/index.js).
// Each call spawns `node` with a small inline runner, writes the request
// JSON on stdin, and reads the response JSON from stdout.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{Feedback, FeedbackChain, FeedbackRequest, FeedbackResponse};

/// Inline runner handed to `node -e`. Loads the entry passed as argv[1],
/// constructs the chain from the request config, and prints the result.
const NODE_RUNNER: &str = r#"
const { PromptFeedbackChain } = require(process.argv[1]);
let buf = "";
process.stdin.on("data", (d) => (buf += d));
process.stdin.on("end", async () => {
  try {
    const req = JSON.parse(buf);
    const chain = new PromptFeedbackChain(req.config);
    const out = await chain.call({ input: req.input });
    process.stdout.write(JSON.stringify(out));
  } catch (err) {
    process.stderr.write(String(err && err.message ? err.message : err));
    process.exit(1);
  }
});
"#;

pub struct NodeChain {
    entry: PathBuf,
}

impl NodeChain {
    pub fn new(entry: impl AsRef<Path>) -> Self {
        Self {
            entry: entry.as_ref().to_path_buf(),
        }
    }

    pub fn entry(&self) -> &Path {
        &self.entry
    }
}

#[async_trait]
impl FeedbackChain for NodeChain {
    async fn call(&self, request: &FeedbackRequest) -> Result<Feedback> {
        let payload = serde_json::to_vec(request).context("Failed to encode chain request")?;

        let mut command = Command::new("node");
        command
            .arg("-e")
            .arg(NODE_RUNNER)
            .arg(&self.entry)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // The component reads its key from the environment; scope the
        // request's key to this child only.
        if let Some(key) = request.api_key.as_deref() {
            command.env("OPENAI_API_KEY", key);
        }

        let mut child = command
            .spawn()
            .with_context(|| format!("Failed to spawn node for {}", self.entry.display()))?;

        {
            let mut stdin = child.stdin.take().context("node stdin was not piped")?;
            stdin
                .write_all(&payload)
                .await
                .context("Failed to write request to node")?;
            // Dropping stdin closes it so the runner sees EOF.
        }

        let output = child
            .wait_with_output()
            .await
            .context("Failed to wait for node")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "Feedback component exited with {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            );
        }

        let parsed: FeedbackResponse = serde_json::from_slice(&output.stdout)
            .context("Failed to parse feedback component output")?;

        Ok(parsed.feedback)
    }

    fn describe(&self) -> String {
        format!("node component at {}", self.entry.display())
    }
}
