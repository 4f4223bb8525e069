use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{mark_all_sent, merge_line_items, OrderLineItem, TableOrder};
use crate::domain::ports::OrderRepository;
use crate::domain::table::TableStatus;
use crate::schema::{table_orders, tables};

use super::models::{decode_items, encode_items, NewTableOrderRow, TableOrderRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn set_table_status(
    conn: &mut PgConnection,
    table_id: &str,
    status: TableStatus,
) -> Result<(), DomainError> {
    diesel::update(tables::table.find(table_id))
        .set(tables::status.eq(status.as_str()))
        .execute(conn)?;
    Ok(())
}

impl OrderRepository for DieselOrderRepository {
    fn list(&self) -> Result<Vec<TableOrder>, DomainError> {
        let mut conn = self.pool.get()?;
        table_orders::table
            .select(TableOrderRow::as_select())
            .order(table_orders::start_time.asc())
            .load(&mut conn)?
            .into_iter()
            .map(TableOrder::try_from)
            .collect()
    }

    fn find_by_table(&self, table_id: &str) -> Result<Option<TableOrder>, DomainError> {
        let mut conn = self.pool.get()?;
        table_orders::table
            .filter(table_orders::table_id.eq(table_id))
            .select(TableOrderRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(TableOrder::try_from)
            .transpose()
    }

    fn add_items(
        &self,
        table_id: &str,
        table_name: &str,
        items: Vec<OrderLineItem>,
    ) -> Result<TableOrder, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // Locking the table row serializes concurrent additions for it,
            // including the very first one that opens the order.
            tables::table
                .find(table_id)
                .select(tables::id)
                .for_update()
                .first::<String>(conn)
                .optional()?
                .ok_or(DomainError::NotFound("Table"))?;

            let current = table_orders::table
                .filter(table_orders::table_id.eq(table_id))
                .select(TableOrderRow::as_select())
                .for_update()
                .first(conn)
                .optional()?;

            let row = match current {
                Some(row) => {
                    let mut merged = decode_items(row.items)?;
                    merge_line_items(&mut merged, items);
                    diesel::update(table_orders::table.find(row.id))
                        .set(table_orders::items.eq(encode_items(&merged)?))
                        .returning(TableOrderRow::as_returning())
                        .get_result(conn)?
                }
                None => diesel::insert_into(table_orders::table)
                    .values(&NewTableOrderRow {
                        table_id: table_id.to_string(),
                        table_name: table_name.to_string(),
                        items: encode_items(&items)?,
                        start_time: Utc::now(),
                    })
                    .returning(TableOrderRow::as_returning())
                    .get_result(conn)?,
            };

            set_table_status(conn, table_id, TableStatus::Occupied)?;
            TableOrder::try_from(row)
        })
    }

    fn mark_sent(&self, table_id: &str) -> Result<Option<TableOrder>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let Some(row) = table_orders::table
                .filter(table_orders::table_id.eq(table_id))
                .select(TableOrderRow::as_select())
                .for_update()
                .first(conn)
                .optional()?
            else {
                return Ok(None);
            };

            let mut items = decode_items(row.items)?;
            mark_all_sent(&mut items);
            let row = diesel::update(table_orders::table.find(row.id))
                .set(table_orders::items.eq(encode_items(&items)?))
                .returning(TableOrderRow::as_returning())
                .get_result(conn)?;
            TableOrder::try_from(row).map(Some)
        })
    }

    fn complete(&self, table_id: &str) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            diesel::delete(table_orders::table.filter(table_orders::table_id.eq(table_id)))
                .execute(conn)?;
            set_table_status(conn, table_id, TableStatus::Available)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::DieselOrderRepository;
    use crate::domain::errors::DomainError;
    use crate::domain::order::OrderLineItem;
    use crate::domain::ports::{OrderRepository, TableRepository};
    use crate::domain::table::{Table, TableStatus};
    use crate::infrastructure::table_repo::DieselTableRepository;
    use crate::infrastructure::test_db::setup_db;

    fn seed_table(pool: &crate::db::DbPool, id: &str) {
        DieselTableRepository::new(pool.clone())
            .create(Table {
                id: id.to_string(),
                name: format!("T{}", id),
                seats: 4,
                category: "General".to_string(),
                status: TableStatus::Available,
            })
            .expect("seed table");
    }

    fn table_status(pool: &crate::db::DbPool, id: &str) -> TableStatus {
        DieselTableRepository::new(pool.clone())
            .find_by_id(id)
            .expect("find failed")
            .expect("table should exist")
            .status
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn add_items_opens_order_and_occupies_table() {
        let (_container, pool) = setup_db().await;
        seed_table(&pool, "1");
        let repo = DieselOrderRepository::new(pool.clone());

        let order = repo
            .add_items("1", "T1", vec![OrderLineItem::new("m1", 2)])
            .expect("add failed");

        assert_eq!(order.table_id, "1");
        assert_eq!(order.items.len(), 1);
        assert_eq!(table_status(&pool, "1"), TableStatus::Occupied);
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn kitchen_scenario_against_postgres() {
        let (_container, pool) = setup_db().await;
        seed_table(&pool, "1");
        let repo = DieselOrderRepository::new(pool.clone());

        repo.add_items("1", "T1", vec![OrderLineItem::new("burger", 2)])
            .expect("first add");
        repo.mark_sent("1").expect("mark sent").expect("order exists");
        repo.add_items("1", "T1", vec![OrderLineItem::new("burger", 1)])
            .expect("second add");
        let order = repo
            .add_items("1", "T1", vec![OrderLineItem::new("burger", 3)])
            .expect("third add");

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].quantity, 2);
        assert!(order.items[0].sent_to_kitchen);
        assert_eq!(order.items[1].quantity, 4);
        assert!(!order.items[1].sent_to_kitchen);

        repo.complete("1").expect("complete");
        assert!(repo.find_by_table("1").expect("find").is_none());
        assert_eq!(table_status(&pool, "1"), TableStatus::Available);
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn passthrough_fields_survive_storage() {
        let (_container, pool) = setup_db().await;
        seed_table(&pool, "1");
        let repo = DieselOrderRepository::new(pool);

        let mut item = OrderLineItem::new("m1", 1);
        item.extra.insert("name".to_string(), json!("Classic Burger"));
        item.extra.insert("price".to_string(), json!(259));
        repo.add_items("1", "T1", vec![item]).expect("add failed");

        let order = repo.find_by_table("1").expect("find").expect("order");
        assert_eq!(order.items[0].extra["name"], json!("Classic Burger"));
        assert_eq!(order.items[0].extra["price"], json!(259));
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn add_items_for_unknown_table_is_not_found() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool);

        let err = repo
            .add_items("ghost", "Ghost", vec![OrderLineItem::new("m1", 1)])
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound("Table")));
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn concurrent_first_additions_share_one_order() {
        let (_container, pool) = setup_db().await;
        seed_table(&pool, "1");
        let repo = Arc::new(DieselOrderRepository::new(pool));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || {
                    repo.add_items("1", "T1", vec![OrderLineItem::new("m1", 1)])
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread panicked").expect("add failed");
        }

        let orders = repo.list().expect("list");
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].items.len(), 1);
        assert_eq!(orders[0].items[0].quantity, 8);
    }
}
