use crate::domain::errors::DomainError;
use crate::domain::ports::SettingsRepository;
use crate::domain::settings::{
    BillConfig, BillConfigPatch, KotConfig, KotConfigPatch, RestaurantSettings,
    RestaurantSettingsPatch,
};

pub struct SettingsService<R> {
    repo: R,
}

impl<R: SettingsRepository> SettingsService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn ensure_defaults(&self) -> Result<(), DomainError> {
        self.repo.ensure_defaults()
    }

    pub fn kot_config(&self) -> Result<KotConfig, DomainError> {
        Ok(self.repo.kot_config()?.unwrap_or_default())
    }

    pub fn update_kot_config(&self, patch: KotConfigPatch) -> Result<KotConfig, DomainError> {
        let updated = self.kot_config()?.apply(patch)?;
        self.repo.save_kot_config(&updated)
    }

    pub fn bill_config(&self) -> Result<BillConfig, DomainError> {
        Ok(self.repo.bill_config()?.unwrap_or_default())
    }

    pub fn update_bill_config(&self, patch: BillConfigPatch) -> Result<BillConfig, DomainError> {
        let updated = self.bill_config()?.apply(patch)?;
        self.repo.save_bill_config(&updated)
    }

    pub fn restaurant_settings(&self) -> Result<RestaurantSettings, DomainError> {
        Ok(self.repo.restaurant_settings()?.unwrap_or_default())
    }

    pub fn update_restaurant_settings(
        &self,
        patch: RestaurantSettingsPatch,
    ) -> Result<RestaurantSettings, DomainError> {
        let updated = self.restaurant_settings()?.apply(patch)?;
        self.repo.save_restaurant_settings(&updated)
    }
}
