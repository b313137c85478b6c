//! Font resolution and bounded readiness waits.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::face::FontFace;
use super::FontError;

/// Boxed future returned by a [`FontResolver`].
pub type FontFuture<'a> = Pin<Box<dyn Future<Output = Result<FontFace, FontError>> + Send + 'a>>;

/// Turns a family name into a usable face, eventually.
pub trait FontResolver: Send + Sync {
    fn resolve<'a>(&'a self, family: &'a str) -> FontFuture<'a>;
}

/// Resolver over font bytes registered in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryFontResolver {
    fonts: HashMap<String, Arc<Vec<u8>>>,
}

impl MemoryFontResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `family` (case-insensitive).
    pub fn insert(&mut self, family: &str, bytes: Vec<u8>) {
        self.fonts
            .insert(family.trim().to_lowercase(), Arc::new(bytes));
    }

    pub fn with_font(mut self, family: &str, bytes: Vec<u8>) -> Self {
        self.insert(family, bytes);
        self
    }
}

impl FontResolver for MemoryFontResolver {
    fn resolve<'a>(&'a self, family: &'a str) -> FontFuture<'a> {
        Box::pin(async move {
            let bytes = self
                .fonts
                .get(&family.trim().to_lowercase())
                .ok_or_else(|| FontError::NotFound(family.to_string()))?;
            FontFace::from_bytes(family, bytes)
        })
    }
}

/// Resolver that looks for `<family>.ttf` / `<family>.otf` in directories.
#[derive(Debug, Default, Clone)]
pub struct DirectoryFontResolver {
    dirs: Vec<PathBuf>,
}

impl DirectoryFontResolver {
    pub fn new(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            dirs: dirs.into_iter().collect(),
        }
    }

    /// Candidate files for `family`, in lookup order.
    pub fn candidates(&self, family: &str) -> Vec<PathBuf> {
        let family = family.trim();
        let mut stems = vec![family.to_string()];
        for stem in [family.replace(' ', ""), family.replace(' ', "-")] {
            if !stems.contains(&stem) {
                stems.push(stem);
            }
        }

        let mut paths = Vec::new();
        for dir in &self.dirs {
            for stem in &stems {
                for ext in ["ttf", "otf"] {
                    paths.push(dir.join(format!("{stem}.{ext}")));
                }
            }
        }
        paths
    }
}

impl FontResolver for DirectoryFontResolver {
    fn resolve<'a>(&'a self, family: &'a str) -> FontFuture<'a> {
        Box::pin(async move {
            for path in self.candidates(family) {
                match tokio::fs::read(&path).await {
                    Ok(bytes) => {
                        debug!(family, path = %path.display(), "font file found");
                        return FontFace::from_bytes(family, &bytes);
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                    Err(source) => return Err(FontError::Io { path, source }),
                }
            }
            Err(FontError::NotFound(family.to_string()))
        })
    }
}

/// Why a readiness wait fell back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedReason {
    /// The resolver did not answer within the bound.
    Timeout(Duration),
    /// The resolver answered with an error.
    Failed(String),
}

impl std::fmt::Display for DegradedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegradedReason::Timeout(d) => write!(f, "font wait timed out after {}ms", d.as_millis()),
            DegradedReason::Failed(reason) => write!(f, "font unavailable: {reason}"),
        }
    }
}

/// Result of waiting for a font family.
#[derive(Debug, Clone)]
pub enum FontReadiness {
    Ready(Arc<FontFace>),
    Degraded {
        reason: DegradedReason,
        fallback: Arc<FontFace>,
    },
}

impl FontReadiness {
    /// Face to measure and draw with.
    pub fn face(&self) -> &Arc<FontFace> {
        match self {
            FontReadiness::Ready(face) => face,
            FontReadiness::Degraded { fallback, .. } => fallback,
        }
    }

    pub fn degraded_reason(&self) -> Option<&DegradedReason> {
        match self {
            FontReadiness::Ready(_) => None,
            FontReadiness::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// Wait for `family`, at most `timeout`, falling back to `fallback`.
pub async fn await_font_ready(
    resolver: &dyn FontResolver,
    family: &str,
    timeout: Duration,
    fallback: Arc<FontFace>,
) -> FontReadiness {
    match tokio::time::timeout(timeout, resolver.resolve(family)).await {
        Ok(Ok(face)) => FontReadiness::Ready(Arc::new(face)),
        Ok(Err(e)) => {
            warn!(family, error = %e, fallback = fallback.family(), "font unavailable");
            FontReadiness::Degraded {
                reason: DegradedReason::Failed(e.to_string()),
                fallback,
            }
        }
        Err(_) => {
            warn!(
                family,
                timeout_ms = timeout.as_millis() as u64,
                fallback = fallback.family(),
                "font wait timed out"
            );
            FontReadiness::Degraded {
                reason: DegradedReason::Timeout(timeout),
                fallback,
            }
        }
    }
}

/// Caching front of a resolver.
///
/// Keeps every resolved face and remembers the most recent one, which is
/// what a degraded wait falls back to. Families that failed outright are not
/// retried; timeouts are.
pub struct FontLoader {
    resolver: Arc<dyn FontResolver>,
    timeout: Duration,
    cache: HashMap<String, Arc<FontFace>>,
    failed: HashSet<String>,
    current: Arc<FontFace>,
}

impl FontLoader {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

    pub fn new(resolver: Arc<dyn FontResolver>) -> Self {
        Self {
            resolver,
            timeout: Self::DEFAULT_TIMEOUT,
            cache: HashMap::new(),
            failed: HashSet::new(),
            current: Arc::new(FontFace::Builtin),
        }
    }

    /// Loader that only ever yields the built-in face.
    pub fn builtin_only() -> Self {
        Self::new(Arc::new(MemoryFontResolver::new()))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Face used when the next wait degrades.
    pub fn current(&self) -> &Arc<FontFace> {
        &self.current
    }

    /// Wait until `family` is usable or the wait degrades.
    pub async fn ready(&mut self, family: &str) -> FontReadiness {
        let key = family.trim().to_lowercase();

        if let Some(face) = self.cache.get(&key) {
            self.current = Arc::clone(face);
            return FontReadiness::Ready(Arc::clone(face));
        }
        if self.failed.contains(&key) {
            return FontReadiness::Degraded {
                reason: DegradedReason::Failed(format!("font family '{family}' not found")),
                fallback: Arc::clone(&self.current),
            };
        }

        let readiness = await_font_ready(
            self.resolver.as_ref(),
            family,
            self.timeout,
            Arc::clone(&self.current),
        )
        .await;

        match &readiness {
            FontReadiness::Ready(face) => {
                self.cache.insert(key, Arc::clone(face));
                self.current = Arc::clone(face);
            }
            FontReadiness::Degraded {
                reason: DegradedReason::Failed(_),
                ..
            } => {
                self.failed.insert(key);
            }
            FontReadiness::Degraded { .. } => {}
        }
        readiness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct PendingResolver;

    impl FontResolver for PendingResolver {
        fn resolve<'a>(&'a self, _family: &'a str) -> FontFuture<'a> {
            Box::pin(std::future::pending::<Result<FontFace, FontError>>())
        }
    }

    #[derive(Default)]
    struct CountingResolver {
        calls: AtomicUsize,
    }

    impl FontResolver for CountingResolver {
        fn resolve<'a>(&'a self, family: &'a str) -> FontFuture<'a> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move { Err(FontError::NotFound(family.to_string())) })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_resolver_times_out() {
        let readiness = await_font_ready(
            &PendingResolver,
            "Inter",
            Duration::from_millis(250),
            Arc::new(FontFace::Builtin),
        )
        .await;

        assert_eq!(
            readiness.degraded_reason(),
            Some(&DegradedReason::Timeout(Duration::from_millis(250)))
        );
        assert!(!readiness.face().is_outline());
    }

    #[tokio::test]
    async fn test_missing_family_degrades_with_failure() {
        let readiness = await_font_ready(
            &MemoryFontResolver::new(),
            "Nope",
            Duration::from_secs(1),
            Arc::new(FontFace::Builtin),
        )
        .await;
        assert!(matches!(
            readiness.degraded_reason(),
            Some(DegradedReason::Failed(msg)) if msg.contains("Nope")
        ));
    }

    #[tokio::test]
    async fn test_loader_does_not_retry_failed_family() {
        let resolver = Arc::new(CountingResolver::default());
        let mut loader = FontLoader::new(resolver.clone());

        loader.ready("Inter").await;
        loader.ready("inter").await;
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_directory_resolver_missing_and_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Broken-Sans.ttf"), b"junk").unwrap();
        let resolver = DirectoryFontResolver::new([dir.path().to_path_buf()]);

        let err = resolver.resolve("Missing").await.unwrap_err();
        assert!(matches!(err, FontError::NotFound(_)));

        let err = resolver.resolve("Broken Sans").await.unwrap_err();
        assert!(matches!(err, FontError::Parse { .. }));
    }

    #[test]
    fn test_candidate_spellings() {
        let resolver = DirectoryFontResolver::new([PathBuf::from("fonts")]);
        let names: Vec<String> = resolver
            .candidates("Open Sans")
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "Open Sans.ttf",
                "Open Sans.otf",
                "OpenSans.ttf",
                "OpenSans.otf",
                "Open-Sans.ttf",
                "Open-Sans.otf",
            ]
        );
    }
}
