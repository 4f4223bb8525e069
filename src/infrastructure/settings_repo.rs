use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::SettingsRepository;
use crate::domain::settings::{BillConfig, KotConfig, RestaurantSettings};
use crate::schema::{bill_config, kot_config, restaurant_settings};

use super::models::{BillConfigRow, KotConfigRow, RestaurantSettingsRow, SINGLETON_ID};

pub struct DieselSettingsRepository {
    pool: DbPool,
}

impl DieselSettingsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl SettingsRepository for DieselSettingsRepository {
    fn ensure_defaults(&self) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let created = diesel::insert_into(kot_config::table)
                .values(&KotConfigRow::from(&KotConfig::default()))
                .on_conflict_do_nothing()
                .execute(conn)?
                + diesel::insert_into(bill_config::table)
                    .values(&BillConfigRow::from(&BillConfig::default()))
                    .on_conflict_do_nothing()
                    .execute(conn)?
                + diesel::insert_into(restaurant_settings::table)
                    .values(&RestaurantSettingsRow::from(&RestaurantSettings::default()))
                    .on_conflict_do_nothing()
                    .execute(conn)?;
            if created > 0 {
                log::info!("Created {} default settings record(s)", created);
            }
            Ok(())
        })
    }

    fn kot_config(&self) -> Result<Option<KotConfig>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = kot_config::table
            .find(SINGLETON_ID)
            .select(KotConfigRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(KotConfig::from))
    }

    fn save_kot_config(&self, config: &KotConfig) -> Result<KotConfig, DomainError> {
        let mut conn = self.pool.get()?;
        let row = KotConfigRow::from(config);
        let saved = diesel::insert_into(kot_config::table)
            .values(&row)
            .on_conflict(kot_config::id)
            .do_update()
            .set(&row)
            .returning(KotConfigRow::as_returning())
            .get_result(&mut conn)?;
        Ok(KotConfig::from(saved))
    }

    fn bill_config(&self) -> Result<Option<BillConfig>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = bill_config::table
            .find(SINGLETON_ID)
            .select(BillConfigRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(BillConfig::from))
    }

    fn save_bill_config(&self, config: &BillConfig) -> Result<BillConfig, DomainError> {
        let mut conn = self.pool.get()?;
        let row = BillConfigRow::from(config);
        let saved = diesel::insert_into(bill_config::table)
            .values(&row)
            .on_conflict(bill_config::id)
            .do_update()
            .set(&row)
            .returning(BillConfigRow::as_returning())
            .get_result(&mut conn)?;
        Ok(BillConfig::from(saved))
    }

    fn restaurant_settings(&self) -> Result<Option<RestaurantSettings>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = restaurant_settings::table
            .find(SINGLETON_ID)
            .select(RestaurantSettingsRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(RestaurantSettings::from))
    }

    fn save_restaurant_settings(
        &self,
        settings: &RestaurantSettings,
    ) -> Result<RestaurantSettings, DomainError> {
        let mut conn = self.pool.get()?;
        let row = RestaurantSettingsRow::from(settings);
        let saved = diesel::insert_into(restaurant_settings::table)
            .values(&row)
            .on_conflict(restaurant_settings::id)
            .do_update()
            .set(&row)
            .returning(RestaurantSettingsRow::as_returning())
            .get_result(&mut conn)?;
        Ok(RestaurantSettings::from(saved))
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;

    use super::DieselSettingsRepository;
    use crate::domain::ports::SettingsRepository;
    use crate::domain::settings::{KotConfig, RestaurantSettings};
    use crate::infrastructure::test_db::setup_db;

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn ensure_defaults_is_idempotent_and_keeps_edits() {
        let (_container, pool) = setup_db().await;
        let repo = DieselSettingsRepository::new(pool);

        repo.ensure_defaults().expect("first ensure");
        let mut settings = repo
            .restaurant_settings()
            .expect("read")
            .expect("row created");
        assert_eq!(settings, RestaurantSettings::default());

        settings.restaurant_name = "Spice Garden".to_string();
        settings.tax_rate = BigDecimal::from(12);
        repo.save_restaurant_settings(&settings).expect("save");
        repo.ensure_defaults().expect("second ensure");

        let stored = repo.restaurant_settings().expect("read").expect("row");
        assert_eq!(stored.restaurant_name, "Spice Garden");
        assert_eq!(stored.tax_rate, BigDecimal::from(12));
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn save_creates_missing_row() {
        let (_container, pool) = setup_db().await;
        let repo = DieselSettingsRepository::new(pool);
        assert!(repo.kot_config().expect("read").is_none());

        let config = KotConfig {
            print_by_department: true,
            selected_printer: Some("Kitchen-1".to_string()),
            ..KotConfig::default()
        };
        repo.save_kot_config(&config).expect("save");

        assert_eq!(repo.kot_config().expect("read"), Some(config));
    }
}
