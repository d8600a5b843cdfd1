//! Participant factory backed by provider profiles

use super::chat_completion::ChatCompletionAdapter;
use super::profile::{ProviderPreset, ProviderProfile};
use roundtable_application::{Participant, ParticipantFactory};
use std::sync::Arc;

/// Builds one [`ChatCompletionAdapter`] per profile, fresh on every call.
#[derive(Debug, Clone)]
pub struct ProfileParticipantFactory {
    profiles: Vec<ProviderProfile>,
}

impl ProfileParticipantFactory {
    pub fn new(profiles: Vec<ProviderProfile>) -> Self {
        Self { profiles }
    }

    /// DeepSeek, Doubao and Wenxin in demo mode.
    pub fn demo() -> Self {
        Self::new(
            ProviderPreset::demo_roster()
                .into_iter()
                .map(ProviderProfile::from_preset)
                .collect(),
        )
    }

    pub fn profiles(&self) -> &[ProviderProfile] {
        &self.profiles
    }
}

impl ParticipantFactory for ProfileParticipantFactory {
    fn participants(&self) -> Vec<Participant> {
        let roster = self.names();
        self.profiles
            .iter()
            .map(|profile| {
                let adapter = ChatCompletionAdapter::new(profile.clone(), roster.iter().cloned());
                Participant::new(profile.name.clone(), Arc::new(adapter))
            })
            .collect()
    }

    fn names(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.name.clone()).collect()
    }
}
