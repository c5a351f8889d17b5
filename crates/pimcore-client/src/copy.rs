//! Clone-and-reparent orchestration.
//!
//! [`PimcoreClient::shallow_copy`] duplicates one resource under a new
//! parent; [`PimcoreClient::copy`] composes it with the batch executor to
//! duplicate a resource together with its direct children. Three modes:
//!
//! - create (default): the clone is posted to the server,
//! - preview: the clone is computed and returned, nothing is posted,
//! - attach-children: the source itself is left alone and only its
//!   children are attached to an existing target parent.

use crate::batch::{run_batch, BatchOutcome};
use crate::client::{GetParams, PimcoreClient};
use crate::error::{BridgeError, CopyError};
use serde_json::{json, Value};
use tracing::debug;

/// Parameters for [`PimcoreClient::shallow_copy`] and
/// [`PimcoreClient::copy`].
#[derive(Debug, Clone, Default)]
pub struct CopyParams {
    /// Id of the source resource.
    pub id: Option<i64>,
    /// Parent the clone (or the attached children) should end up under.
    pub parent_id: Option<i64>,
    /// Replacement key (name) for the clone.
    pub key: Option<String>,
    /// Replacement children list written into the clone payload.
    pub childs: Option<Value>,
    /// Compute the clone without creating it.
    pub preview: bool,
    /// Recursively copy direct children under the newly created parent.
    pub children: bool,
    /// Attach the source's children to `parent_id` without re-creating the
    /// source itself.
    pub add_children: bool,
}

impl CopyParams {
    /// Source id plus target parent, the two required fields.
    #[must_use]
    pub fn new(id: i64, parent_id: i64) -> Self {
        Self {
            id: Some(id),
            parent_id: Some(parent_id),
            ..Self::default()
        }
    }

    /// Rename the clone.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Replace the clone's children list.
    #[must_use]
    pub fn with_childs(mut self, childs: Value) -> Self {
        self.childs = Some(childs);
        self
    }

    /// Switch to preview mode.
    #[must_use]
    pub fn with_preview(mut self) -> Self {
        self.preview = true;
        self
    }

    /// Also copy the source's direct children.
    #[must_use]
    pub fn with_children(mut self) -> Self {
        self.children = true;
        self
    }

    /// Switch to attach-children mode.
    #[must_use]
    pub fn with_add_children(mut self) -> Self {
        self.add_children = true;
        self
    }
}

/// Outcome of a shallow copy.
#[derive(Debug, Clone)]
pub struct ShallowCopy {
    /// The source resource exactly as fetched, untouched.
    pub original: Value,
    /// The reparented clone; present only when no create was issued
    /// (preview or attach-children mode).
    pub copy: Option<Value>,
    /// Id of the newly created resource when a create was issued.
    pub id: Option<i64>,
}

/// Outcome of a recursive copy.
#[derive(Debug)]
pub enum CopyReport {
    /// The resource was copied without touching its children.
    Single(ShallowCopy),
    /// Children were fanned out after the parent step.
    WithChildren {
        /// Parent id the children were attached to: the freshly created
        /// parent in children mode, the caller-supplied target in
        /// attach-children mode.
        parent_id: Option<i64>,
        /// Per-child outcomes.
        children: BatchOutcome<ShallowCopy, CopyError>,
    },
}

impl PimcoreClient {
    /// Duplicate a single resource under a new parent.
    ///
    /// Fetches the source, strips the identity fields (`id`, `path`),
    /// rewrites `parentId`, and applies the optional `key`/`childs`
    /// overrides. In preview or attach-children mode the clone is returned
    /// without any create call; otherwise it is posted and the new id is
    /// reported.
    pub async fn shallow_copy(
        &self,
        resource: &str,
        params: &CopyParams,
    ) -> Result<ShallowCopy, CopyError> {
        let (Some(id), Some(parent_id)) = (params.id, params.parent_id) else {
            return Err(CopyError::Validation(BridgeError::validation(
                "missing id or parentId",
            )));
        };

        let fetched = self
            .get(resource, Some(id), &GetParams::default())
            .await
            .map_err(CopyError::Fetch)?;
        let original = fetched.into_data();

        let mut clone = original.clone();
        if let Some(fields) = clone.as_object_mut() {
            fields.remove("id");
            fields.remove("path");
            fields.insert("parentId".to_string(), json!(parent_id));
            if let Some(childs) = &params.childs {
                fields.insert("childs".to_string(), childs.clone());
            }
            if let Some(key) = &params.key {
                fields.insert("key".to_string(), json!(key));
            }
        }

        if params.preview || params.add_children {
            debug!("shallow copy of {resource} {id} computed without create");
            return Ok(ShallowCopy {
                original,
                copy: Some(clone),
                id: None,
            });
        }

        match self.create(resource, &clone).await {
            Ok(created) => Ok(ShallowCopy {
                id: created.id(),
                original,
                copy: None,
            }),
            Err(error) => Err(CopyError::Create { error, original }),
        }
    }

    /// Duplicate a resource, optionally together with its direct children.
    ///
    /// The parent step is always a [`shallow_copy`](Self::shallow_copy);
    /// its failure propagates unchanged. Without the `children` or
    /// `add_children` flag that single outcome is the whole report.
    /// Otherwise every entry of the source's `childs` list is shallow-copied
    /// concurrently: under the freshly created parent in children mode, or
    /// under the caller-supplied `parent_id` in attach-children mode.
    pub async fn copy(
        &self,
        resource: &str,
        params: &CopyParams,
    ) -> Result<CopyReport, CopyError> {
        let parent_step = self.shallow_copy(resource, params).await?;

        if !params.children && !params.add_children {
            return Ok(CopyReport::Single(parent_step));
        }

        let parent_id = if params.add_children {
            params.parent_id
        } else {
            parent_step.id
        };

        let childs = parent_step
            .original
            .get("childs")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        debug!("fanning out {} child copies", childs.len());

        let children = run_batch(childs, |child| {
            let child_params = CopyParams {
                id: child.get("id").and_then(Value::as_i64),
                parent_id,
                ..CopyParams::default()
            };
            async move { self.shallow_copy(resource, &child_params).await }
        })
        .await;

        Ok(CopyReport::WithChildren {
            parent_id,
            children,
        })
    }
}
