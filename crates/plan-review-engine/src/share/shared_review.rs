use crate::models::{Annotation, AuthorIdentity, ShareableAnnotation, ShareablePlan};
use crate::parsing::{blocks::Block, parse};

use super::{ShareError, codec::open_share, merge::reshare};

/// Display name for local annotations before the reviewer has named themselves.
pub const LOCAL_AUTHOR: &str = "You";

/// A decoded share link opened for further review.
///
/// Annotations that came with the link are read-only; the reviewer adds and
/// deletes only their own local ones, which are folded in on re-share.
#[derive(Debug, Clone)]
pub struct SharedReview {
    plan: ShareablePlan,
    blocks: Vec<Block>,
    local: Vec<Annotation>,
    identity: Option<AuthorIdentity>,
}

impl SharedReview {
    pub fn new(plan: ShareablePlan) -> Self {
        let blocks = parse(&plan.content);
        Self {
            plan,
            blocks,
            local: vec![],
            identity: None,
        }
    }

    /// Opens a share URL or bare payload.
    pub fn open(input: &str) -> Result<Self, ShareError> {
        open_share(input).map(Self::new).ok_or(ShareError::InvalidLink)
    }

    pub fn plan(&self) -> &ShareablePlan {
        &self.plan
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn local(&self) -> &[Annotation] {
        &self.local
    }

    pub fn identity(&self) -> Option<&AuthorIdentity> {
        self.identity.as_ref()
    }

    /// Sets who is reviewing. Local annotations made anonymously take the name.
    pub fn set_identity(&mut self, identity: AuthorIdentity) {
        for a in self.local.iter_mut().filter(|a| a.author.is_none()) {
            a.author = Some(identity.name.clone());
        }
        self.identity = Some(identity);
    }

    pub fn is_read_only(&self, id: &str) -> bool {
        self.plan.annotations.iter().any(|a| a.id() == id)
    }

    pub fn add_local(&mut self, mut annotation: Annotation) {
        if let Some(identity) = &self.identity {
            annotation.author = Some(identity.name.clone());
        }
        self.local.push(annotation);
    }

    pub fn delete_local(&mut self, id: &str) -> Result<Annotation, ShareError> {
        if self.is_read_only(id) {
            return Err(ShareError::ReadOnly(id.to_string()));
        }
        let index = self
            .local
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| ShareError::UnknownAnnotation(id.to_string()))?;
        Ok(self.local.remove(index))
    }

    /// Shared annotations followed by local ones, as shown side by side.
    pub fn combined(&self) -> Vec<ShareableAnnotation> {
        let (name, color) = match &self.identity {
            Some(id) => (id.name.clone(), Some(id.color.clone())),
            None => (LOCAL_AUTHOR.to_string(), None),
        };
        self.plan
            .annotations
            .iter()
            .cloned()
            .chain(self.local.iter().map(|a| ShareableAnnotation {
                annotation: a.clone(),
                author_name: name.clone(),
                author_color: color.clone(),
            }))
            .collect()
    }

    /// The next version of the plan with local annotations merged in.
    ///
    /// Local annotations need a named author before they can be shared.
    pub fn reshare(&self) -> Result<ShareablePlan, ShareError> {
        if self.identity.is_none() && !self.local.is_empty() {
            return Err(ShareError::IdentityRequired);
        }
        Ok(reshare(&self.plan, &self.local, self.identity.as_ref()))
    }
}
