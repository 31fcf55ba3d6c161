//! MongoDB mirror client setup and write-through operations.
//!
//! The mirror duplicates roster rows into a remote document store. It is
//! strictly best-effort: callers treat every error here as non-fatal.

use crate::MemberDocument;
use matchpoint_error::{MirrorError, MirrorErrorKind, MirrorResult};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Server selection and connect timeout applied to the client.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Repair a connection string that lost its query separator.
///
/// Some hosting dashboards mangle `?` into `#` when copying connection
/// strings. When the URI contains `#` but no `?`, every `#` is rewritten
/// back to `?`; otherwise the URI passes through unchanged.
pub fn normalize_uri(uri: &str) -> String {
    if uri.contains('#') && !uri.contains('?') {
        uri.replace('#', "?")
    } else {
        uri.to_string()
    }
}

/// Write-through handle to the remote roster mirror.
///
/// Constructed by [`MirrorStore::connect`], which probes the deployment
/// with a `ping` before handing the collection out. Writes are keyed on
/// `username`, matching the local roster's uniqueness constraint.
///
/// # Example
/// ```no_run
/// use matchpoint_mirror::{MemberDocument, MirrorStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mirror = MirrorStore::connect("mongodb://localhost/matchpoint").await?;
/// mirror
///     .upsert_member(&MemberDocument {
///         username: "alice".to_string(),
///         has_general_role: true,
///         has_singles_role: false,
///         has_doubles_role: false,
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct MirrorStore {
    /// Remote collection holding one document per username
    collection: Collection<MemberDocument>,
}

impl MirrorStore {
    /// Connect to the deployment named by `uri` and probe it.
    ///
    /// The URI is passed through [`normalize_uri`] first. Connection and
    /// server selection both time out after five seconds, and the
    /// deployment must answer a `ping` on the `admin` database before any
    /// collection handle is created.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The connection string does not parse or names no default database
    /// - The client fails to initialize
    /// - The liveness probe is rejected or times out
    #[instrument(skip(uri))]
    pub async fn connect(uri: &str) -> MirrorResult<Self> {
        let uri = normalize_uri(uri);

        let mut options = ClientOptions::parse(&uri).await.map_err(|e| {
            MirrorError::new(MirrorErrorKind::Configuration(format!(
                "Invalid connection string: {}",
                e
            )))
        })?;
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);
        options.connect_timeout = Some(CONNECT_TIMEOUT);

        let client = Client::with_options(options).map_err(|e| {
            MirrorError::new(MirrorErrorKind::Connection(format!(
                "Failed to build client: {}",
                e
            )))
        })?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| MirrorError::new(MirrorErrorKind::Probe(e.to_string())))?;

        info!("Mirror deployment answered ping");

        // The collection lives in the connection string's default database.
        let database = client.default_database().ok_or_else(|| {
            MirrorError::new(MirrorErrorKind::Configuration(
                "Connection string names no default database".to_string(),
            ))
        })?;

        let collection = database.collection(MemberDocument::COLLECTION);
        Ok(Self { collection })
    }

    /// Insert or fully replace the document for `member.username`.
    #[instrument(skip(self, member), fields(username = %member.username))]
    pub async fn upsert_member(&self, member: &MemberDocument) -> MirrorResult<()> {
        self.collection
            .replace_one(doc! { "username": &member.username }, member)
            .upsert(true)
            .await
            .map_err(|e| MirrorError::new(MirrorErrorKind::Write(e.to_string())))?;

        debug!("Mirrored roster row");
        Ok(())
    }

    /// Update a single flag field on an existing document.
    ///
    /// `field` must be one of the [`MemberDocument`] `FIELD_*` constants.
    /// A username with no mirrored document is left alone; the next
    /// [`MirrorStore::upsert_member`] will create it.
    #[instrument(skip(self))]
    pub async fn set_flag(
        &self,
        username: &str,
        field: &'static str,
        value: bool,
    ) -> MirrorResult<()> {
        let updated = self
            .collection
            .update_one(
                doc! { "username": username },
                doc! { "$set": { field: value } },
            )
            .await
            .map_err(|e| MirrorError::new(MirrorErrorKind::Write(e.to_string())))?;

        if updated.matched_count == 0 {
            debug!("No mirrored document for username, skipping flag update");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_uri_repairs_hash() {
        let fixed = normalize_uri("mongodb+srv://u:p@cluster.example.net/club#authSource=admin");
        assert_eq!(
            fixed,
            "mongodb+srv://u:p@cluster.example.net/club?authSource=admin"
        );
    }

    #[test]
    fn test_normalize_uri_keeps_query_uris() {
        let uri = "mongodb+srv://u:p@cluster.example.net/club?retryWrites=true#frag";
        assert_eq!(normalize_uri(uri), uri);
    }

    #[test]
    fn test_normalize_uri_passthrough() {
        let uri = "mongodb://localhost:27017/club";
        assert_eq!(normalize_uri(uri), uri);
    }

    #[test]
    fn test_normalize_uri_rewrites_every_hash() {
        let fixed = normalize_uri("mongodb://host/db#a=1#b=2");
        assert_eq!(fixed, "mongodb://host/db?a=1?b=2");
    }
}
