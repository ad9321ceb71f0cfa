//! Profile and nutrition target service
//!
//! Owns onboarding, profile edits and the cached NutritionGoals that are
//! re-derived whenever the profile changes.

use crate::auth::JwtService;
use crate::error::{ApiError, ApiResult};
use crate::store::OwnerStore;
use chrono::{DateTime, Utc};
use fittrack_shared::nutrition_goals::goals_for_profile;
use fittrack_shared::validation::{apply_profile_update, profile_from_onboarding, weight_entry};
use fittrack_shared::workout_plan::{generate_plan, PersonalizedPlan};
use fittrack_shared::{
    NutritionGoals, OnboardingRequest, OnboardingResponse, Profile, ProfileResponse,
    UpdateProfileRequest, SINGLETON_ID,
};
use tracing::info;

pub struct ProfileService;

impl ProfileService {
    /// Create the owner's profile, derive goals and issue onboarded tokens
    ///
    /// The onboarding weight is also stored as the first weight entry.
    pub async fn onboard(
        docs: &OwnerStore,
        jwt: &JwtService,
        req: OnboardingRequest,
        now: DateTime<Utc>,
    ) -> ApiResult<OnboardingResponse> {
        if docs.load::<Profile>(SINGLETON_ID).await?.is_some() {
            return Err(ApiError::Conflict("Profile already exists".to_string()));
        }

        let profile = profile_from_onboarding(&req, now)?;
        let goals = goals_for_profile(&profile)?;
        let first_weight = weight_entry(profile.weight_kg, now)?;

        docs.save(&profile).await?;
        docs.save(&goals).await?;
        docs.save(&first_weight).await?;

        let session = jwt.issue(docs.owner(), true)?;

        info!(
            owner = %docs.owner(),
            goal = %profile.goal.as_str(),
            calories = goals.calories,
            "Onboarding completed"
        );

        Ok(OnboardingResponse {
            profile,
            goals,
            session,
        })
    }

    /// The stored profile; a missing one means onboarding never finished
    pub async fn require_profile(docs: &OwnerStore) -> ApiResult<Profile> {
        docs.load::<Profile>(SINGLETON_ID)
            .await?
            .ok_or_else(|| ApiError::Forbidden("Onboarding required".to_string()))
    }

    pub async fn has_profile(docs: &OwnerStore) -> ApiResult<bool> {
        Ok(docs.load::<Profile>(SINGLETON_ID).await?.is_some())
    }

    pub async fn get_profile(docs: &OwnerStore) -> ApiResult<ProfileResponse> {
        let profile = Self::require_profile(docs).await?;
        let goals = Self::goals_from(docs, &profile).await?;
        Ok(ProfileResponse { profile, goals })
    }

    /// Apply an edit and re-derive the cached goals
    pub async fn update_profile(
        docs: &OwnerStore,
        req: UpdateProfileRequest,
        now: DateTime<Utc>,
    ) -> ApiResult<ProfileResponse> {
        let mut profile = Self::require_profile(docs).await?;
        apply_profile_update(&mut profile, &req, now)?;
        let goals = Self::save_with_goals(docs, &profile).await?;

        info!(owner = %docs.owner(), calories = goals.calories, "Profile updated");
        Ok(ProfileResponse { profile, goals })
    }

    /// Persist a changed profile together with freshly derived goals
    pub async fn save_with_goals(docs: &OwnerStore, profile: &Profile) -> ApiResult<NutritionGoals> {
        let goals = goals_for_profile(profile)?;
        docs.save(profile).await?;
        docs.save(&goals).await?;
        Ok(goals)
    }

    /// Cached goals, re-derived and re-cached when missing
    pub async fn goals(docs: &OwnerStore) -> ApiResult<NutritionGoals> {
        let profile = Self::require_profile(docs).await?;
        Self::goals_from(docs, &profile).await
    }

    async fn goals_from(docs: &OwnerStore, profile: &Profile) -> ApiResult<NutritionGoals> {
        if let Some(goals) = docs.load::<NutritionGoals>(SINGLETON_ID).await? {
            return Ok(goals);
        }
        let goals = goals_for_profile(profile)?;
        docs.save(&goals).await?;
        Ok(goals)
    }

    /// Goals only if the owner has onboarded
    pub async fn cached_goals(docs: &OwnerStore) -> ApiResult<Option<NutritionGoals>> {
        match docs.load::<Profile>(SINGLETON_ID).await? {
            Some(profile) => Ok(Some(Self::goals_from(docs, &profile).await?)),
            None => Ok(None),
        }
    }

    pub async fn plan(docs: &OwnerStore) -> ApiResult<PersonalizedPlan> {
        let profile = Self::require_profile(docs).await?;
        Ok(generate_plan(&profile)?)
    }
}
