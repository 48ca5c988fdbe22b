// Component resolution across install layouts
//
// The prompt-feedback component can be reached three ways, tried in order:
//   1. a running service (PROMPT_FEEDBACK_URL env or config file)
//   2. an installed npm package under node_modules/
//   3. a source checkout near the working directory with a compiled dist/
// The first usable source wins; none is a terminal error.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::{FeedbackChain, NodeChain, RemoteChain};

pub const SERVICE_URL_ENV: &str = "PROMPT_FEEDBACK_URL";

const PACKAGE_ENTRY: &str = "node_modules/langchain-prompt-feedback/dist/index.js";

/// Checkout candidates relative to the search root, nearest first.
const CHECKOUT_CANDIDATES: &[&str] = [".", "..", "../.."].as_slice();

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(
        "Prompt feedback component not found. Searched: {searched}.\n\
         Install it with `npm install langchain-prompt-feedback`, build a \
         checkout with `npm run build`, or set PROMPT_FEEDBACK_URL to a \
         running service."
    )]
    ComponentNotFound { searched: String },
}

/// A resolved component plus where it came from.
pub struct ResolvedChain {
    chain: Arc<dyn FeedbackChain>,
    import_info: String,
}

impl std::fmt::Debug for ResolvedChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedChain")
            .field("import_info", &self.import_info)
            .finish_non_exhaustive()
    }
}

impl ResolvedChain {
    pub fn chain(&self) -> Arc<dyn FeedbackChain> {
        Arc::clone(&self.chain)
    }

    /// Where the component was found, for /health and startup logs.
    pub fn import_info(&self) -> &str {
        &self.import_info
    }
}

/// Resolve the feedback component.
///
/// `service_url` comes from the config file; the environment variable takes
/// precedence over it. Filesystem layouts are checked relative to `root`.
pub fn resolve_chain(root: &Path, service_url: Option<&str>) -> Result<ResolvedChain> {
    let env_url = std::env::var(SERVICE_URL_ENV).ok().filter(|u| !u.is_empty());

    if let Some(url) = env_url.as_deref().or(service_url) {
        let chain = RemoteChain::new(url)?;
        let import_info = chain.describe();
        tracing::info!("Resolved feedback component: {}", import_info);
        return Ok(ResolvedChain {
            chain: Arc::new(chain),
            import_info,
        });
    }

    // Installed package layout
    let package_entry = root.join(PACKAGE_ENTRY);
    if package_entry.is_file() {
        return Ok(node_chain(package_entry, "installed package"));
    }

    // Source checkout layouts: require the component source to be present
    // and a compiled dist/ entry to run.
    for candidate in CHECKOUT_CANDIDATES {
        let dir = root.join(candidate);
        if !checkout_has_component(&dir) {
            continue;
        }
        let entry = dir.join("dist/index.js");
        if entry.is_file() {
            return Ok(node_chain(entry, &format!("source checkout at {candidate}")));
        }
        tracing::warn!(
            "Found component source at {} but no dist/index.js; run `npm run build` there",
            dir.display()
        );
    }

    Err(AdapterError::ComponentNotFound {
        searched: format!(
            "{SERVICE_URL_ENV}, {PACKAGE_ENTRY}, checkouts at {}",
            CHECKOUT_CANDIDATES.join(", ")
        ),
    }
    .into())
}

fn checkout_has_component(dir: &Path) -> bool {
    let src = dir.join("src");
    src.join("PromptFeedbackChain.ts").is_file() || src.join("PromptFeedbackChain.js").is_file()
}

fn node_chain(entry: PathBuf, origin: &str) -> ResolvedChain {
    let import_info = format!("{} ({})", origin, entry.display());
    tracing::info!("Resolved feedback component: {}", import_info);
    ResolvedChain {
        chain: Arc::new(NodeChain::new(entry)),
        import_info,
    }
}
