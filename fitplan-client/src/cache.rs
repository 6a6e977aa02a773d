use fitplan_model::{
    biometrics::Goal,
    plan::{MacroPlan, PlanBundle},
    request::PlanRequest,
};
use log::debug;

use crate::client::{Client, Result};

struct Submitted {
    request: PlanRequest,
    goal: Goal,
    bundle: PlanBundle,
}

/// Remembers the last submitted request together with the bundle the server
/// returned for it.
#[derive(Default)]
pub struct PlanCache {
    last: Option<Submitted>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bundle for `request`, calling the server only when the
    /// cached one cannot answer it. A request that differs only by goal is
    /// answered locally unless it belongs to a user, whose stored goal has
    /// to be updated on the server.
    pub async fn submit(
        &mut self,
        client: &dyn Client,
        request: PlanRequest,
    ) -> Result<PlanBundle> {
        let (_, goal) = request.validate()?;

        if let Some(last) = self.last.as_mut() {
            let same_user = last.request.user_id == request.user_id;
            let goal_is_local = request.user_id.is_none() || last.goal == goal;
            if same_user && goal_is_local && last.request.same_biometrics(&request) {
                debug!("Reusing cached plan bundle for goal {}", goal);
                last.goal = goal;
                last.request = request;
                return Ok(last.bundle.clone());
            }
        }

        let bundle = client.calculate_plan(&request).await?;
        self.last = Some(Submitted {
            request,
            goal,
            bundle: bundle.clone(),
        });
        Ok(bundle)
    }

    /// Switches the displayed goal without touching the server.
    pub fn select_goal(&mut self, goal: Goal) -> Option<&MacroPlan> {
        let last = self.last.as_mut()?;
        last.goal = goal;
        last.request.goal = Some(goal.to_string());
        Some(last.bundle.active(goal))
    }

    pub fn active(&self) -> Option<&MacroPlan> {
        self.last.as_ref().map(|last| last.bundle.active(last.goal))
    }

    pub fn bundle(&self) -> Option<&PlanBundle> {
        self.last.as_ref().map(|last| &last.bundle)
    }

    pub fn last_request(&self) -> Option<&PlanRequest> {
        self.last.as_ref().map(|last| &last.request)
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// Holds generated output the user has not yet saved or thrown away.
#[derive(Debug)]
pub struct DraftCache<T> {
    draft: Option<T>,
}

impl<T> Default for DraftCache<T> {
    fn default() -> Self {
        Self { draft: None }
    }
}

impl<T> DraftCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the draft only when generation succeeded; a failure leaves
    /// the previous draft in place.
    pub fn populate<E>(
        &mut self,
        result: std::result::Result<T, E>,
    ) -> std::result::Result<&T, E> {
        let draft: &T = self.draft.insert(result?);
        Ok(draft)
    }

    pub fn get(&self) -> Option<&T> {
        self.draft.as_ref()
    }

    /// Hands the draft over for saving and empties the cache.
    pub fn take(&mut self) -> Option<T> {
        self.draft.take()
    }

    pub fn discard(&mut self) {
        self.draft = None;
    }

    pub fn is_empty(&self) -> bool {
        self.draft.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_lifecycle() {
        let mut cache = DraftCache::new();
        assert!(cache.is_empty());

        assert_eq!(cache.populate::<()>(Ok("first")), Ok(&"first"));
        assert_eq!(
            cache.populate(Err("generation failed")),
            Err("generation failed")
        );
        assert_eq!(cache.get(), Some(&"first"));

        assert_eq!(cache.populate::<()>(Ok("second")), Ok(&"second"));
        assert_eq!(cache.take(), Some("second"));
        assert!(cache.is_empty());

        cache.populate::<()>(Ok("third")).unwrap();
        cache.discard();
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn empty_plan_cache() {
        let mut cache = PlanCache::new();
        assert!(cache.active().is_none());
        assert!(cache.bundle().is_none());
        assert!(cache.select_goal(Goal::Gain).is_none());
    }
}
