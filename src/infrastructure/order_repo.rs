use diesel::dsl::max;
use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrderItem, Order, OrderInput, OrderItem, OrderView};
use crate::domain::page::{ListQuery, Page};
use crate::domain::patch::PatchSet;
use crate::domain::ports::OrderRepository;
use crate::domain::pricing::LineAmount;
use crate::schema::{customers, order_items, orders, staffs, stocks, stores};

use super::models::{
    CustomerRow, NewOrderRow, OrderChanges, OrderItemRow, OrderRow, StaffRow, StockRow, StoreRow,
};
use super::patch::execute_patch;

#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Puts `quantity` units back into the store, creating the row if needed.
fn restock(
    conn: &mut PgConnection,
    store_id: i32,
    product_id: i32,
    quantity: i32,
) -> QueryResult<StockRow> {
    diesel::insert_into(stocks::table)
        .values(&StockRow {
            store_id,
            product_id,
            quantity,
        })
        .on_conflict((stocks::store_id, stocks::product_id))
        .do_update()
        .set(stocks::quantity.eq(stocks::quantity + quantity))
        .returning(StockRow::as_returning())
        .get_result(conn)
}

/// Locks the order row. Items hold stock reserved from the order's store, so
/// an order with items cannot move to another store. Returns false when the
/// order does not exist.
fn lock_for_store_change(
    conn: &mut PgConnection,
    order_id: i32,
    new_store: Option<i32>,
) -> Result<bool, DomainError> {
    let current: Option<i32> = orders::table
        .find(order_id)
        .select(orders::store_id)
        .for_update()
        .first(conn)
        .optional()?;
    let Some(current) = current else {
        return Ok(false);
    };

    if let Some(new_store) = new_store.filter(|store| *store != current) {
        let items: i64 = order_items::table
            .filter(order_items::order_id.eq(order_id))
            .count()
            .get_result(conn)?;
        if items > 0 {
            log::warn!(
                "Refused to move order {order_id} from store {current} to {new_store}: {items} item(s) reserved"
            );
            return Err(DomainError::Conflict(format!(
                "order {order_id} has items reserved from store {current}; remove them before changing store_id"
            )));
        }
    }
    Ok(true)
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, input: &OrderInput) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;
        let id = diesel::insert_into(orders::table)
            .values(&NewOrderRow {
                customer_id: input.customer_id,
                order_status: input.order_status,
                order_date: input.order_date,
                required_date: input.required_date,
                shipped_date: input.shipped_date,
                store_id: input.store_id,
                staff_id: input.staff_id,
                promo_code: input.promo_code,
            })
            .returning(orders::order_id)
            .get_result(&mut conn)?;
        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        // One snapshot for the order and everything it references.
        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, DomainError, _>(|conn| {
                let order = orders::table
                    .find(id)
                    .select(OrderRow::as_select())
                    .first(conn)
                    .optional()?;

                let Some(order) = order else {
                    return Ok(None);
                };

                let customer = customers::table
                    .find(order.customer_id)
                    .select(CustomerRow::as_select())
                    .first(conn)?;
                let store = stores::table
                    .find(order.store_id)
                    .select(StoreRow::as_select())
                    .first(conn)?;
                let staff = staffs::table
                    .find(order.staff_id)
                    .select(StaffRow::as_select())
                    .first(conn)?;
                let items = OrderItemRow::belonging_to(&order)
                    .select(OrderItemRow::as_select())
                    .order(order_items::item_id)
                    .load(conn)?;

                Ok(Some(OrderView {
                    order: order.into(),
                    customer_data: customer.into(),
                    store_data: store.into(),
                    staff_data: staff.into(),
                    order_items: items.into_iter().map(OrderItem::from).collect(),
                }))
            })
    }

    fn list(&self, query: &ListQuery) -> Result<Page<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let count: i64 = orders::table.count().get_result(conn)?;

            let rows = orders::table
                .select(OrderRow::as_select())
                .order(orders::order_id)
                .offset(query.offset)
                .limit(query.limit)
                .load(conn)?;

            Ok(Page {
                count,
                items: rows.into_iter().map(Order::from).collect(),
            })
        })
    }

    fn update(&self, id: i32, input: &OrderInput) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            if !lock_for_store_change(conn, id, Some(input.store_id))? {
                return Ok(0);
            }
            let rows = diesel::update(orders::table.find(id))
                .set(&OrderChanges {
                    customer_id: input.customer_id,
                    order_status: input.order_status,
                    order_date: input.order_date,
                    required_date: input.required_date,
                    shipped_date: Some(input.shipped_date),
                    store_id: input.store_id,
                    staff_id: input.staff_id,
                    promo_code: Some(input.promo_code),
                })
                .execute(conn)?;
            Ok(rows)
        })
    }

    fn patch(&self, patch: &PatchSet) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            if !lock_for_store_change(conn, patch.id(), patch.int("store_id"))? {
                return Ok(0);
            }
            Ok(execute_patch(conn, patch)?)
        })
    }

    fn delete(&self, id: i32) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::delete(orders::table.find(id)).execute(&mut conn)?)
    }

    fn add_item(&self, order_id: i32, item: &NewOrderItem) -> Result<OrderItem, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Lock the order; concurrent adds to it queue up here, which
            //    keeps item numbering gap-free.
            let store_id: i32 = orders::table
                .find(order_id)
                .select(orders::store_id)
                .for_update()
                .first(conn)
                .optional()?
                .ok_or(DomainError::NotFound("Order"))?;

            // 2. Lock and check the stock row of the order's store
            let available: i32 = stocks::table
                .find((store_id, item.product_id))
                .select(stocks::quantity)
                .for_update()
                .first(conn)
                .optional()?
                .ok_or(DomainError::NotFound("Stock"))?;
            if item.quantity > available {
                return Err(DomainError::InsufficientStock {
                    requested: item.quantity,
                    available,
                });
            }

            // 3. Reserve
            diesel::update(stocks::table.find((store_id, item.product_id)))
                .set(stocks::quantity.eq(stocks::quantity - item.quantity))
                .execute(conn)?;

            // 4. Append the item
            let last: Option<i32> = order_items::table
                .filter(order_items::order_id.eq(order_id))
                .select(max(order_items::item_id))
                .first(conn)?;
            let row = diesel::insert_into(order_items::table)
                .values(&OrderItemRow {
                    order_id,
                    item_id: last.unwrap_or(0) + 1,
                    product_id: item.product_id,
                    quantity: item.quantity,
                    list_price: item.list_price.clone(),
                    discount: item.discount.clone(),
                })
                .returning(OrderItemRow::as_returning())
                .get_result(conn)?;

            Ok(row.into())
        })
    }

    fn remove_item(&self, order_id: i32, item_id: i32) -> Result<Option<OrderItem>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let store_id: Option<i32> = orders::table
                .find(order_id)
                .select(orders::store_id)
                .for_update()
                .first(conn)
                .optional()?;
            let Some(store_id) = store_id else {
                return Ok(None);
            };

            let removed = diesel::delete(order_items::table.find((order_id, item_id)))
                .returning(OrderItemRow::as_returning())
                .get_result(conn)
                .optional()?;
            let Some(removed) = removed else {
                return Ok(None);
            };

            restock(conn, store_id, removed.product_id, removed.quantity)?;
            Ok(Some(removed.into()))
        })
    }

    fn line_amounts(&self, order_id: i32) -> Result<Vec<LineAmount>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows: Vec<(bigdecimal::BigDecimal, i32)> = order_items::table
            .filter(order_items::order_id.eq(order_id))
            .select((order_items::list_price, order_items::quantity))
            .load(&mut conn)?;
        Ok(rows
            .into_iter()
            .map(|(list_price, quantity)| LineAmount {
                list_price,
                quantity,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::patch::ORDER_PATCH;
    use crate::domain::ports::StockRepository;
    use crate::domain::stock::StockInput;
    use crate::infrastructure::stock_repo::DieselStockRepository;
    use crate::infrastructure::test_support::{
        create_order, create_product, date, dec, seed, setup_db, Fixture,
    };

    fn item(product_id: i32, quantity: i32, price: &str) -> NewOrderItem {
        NewOrderItem {
            product_id,
            quantity,
            list_price: dec(price),
            discount: dec("0"),
        }
    }

    fn stock_of(pool: &DbPool, store_id: i32, product_id: i32) -> Option<i32> {
        let mut conn = pool.get().expect("connection");
        stocks::table
            .find((store_id, product_id))
            .select(stocks::quantity)
            .first(&mut conn)
            .optional()
            .expect("query stock")
    }

    fn stocked(pool: &DbPool, fixture: &Fixture, quantity: i32) {
        DieselStockRepository::new(pool.clone())
            .create(&StockInput {
                store_id: fixture.store_a,
                product_id: fixture.product_id,
                quantity,
            })
            .expect("create stock");
    }

    #[tokio::test]
    async fn add_item_reserves_stock_and_numbers_items() {
        let (_container, pool) = setup_db().await;
        let fixture = seed(&pool);
        stocked(&pool, &fixture, 10);
        let order_id = create_order(&pool, &fixture, fixture.store_a);
        let repo = DieselOrderRepository::new(pool.clone());

        let first = repo
            .add_item(order_id, &item(fixture.product_id, 3, "379.99"))
            .expect("add first");
        let second = repo
            .add_item(order_id, &item(fixture.product_id, 2, "379.99"))
            .expect("add second");

        assert_eq!(first.item_id, 1);
        assert_eq!(second.item_id, 2);
        assert_eq!(stock_of(&pool, fixture.store_a, fixture.product_id), Some(5));
    }

    #[tokio::test]
    async fn add_item_over_stock_leaves_order_unchanged() {
        let (_container, pool) = setup_db().await;
        let fixture = seed(&pool);
        stocked(&pool, &fixture, 2);
        let order_id = create_order(&pool, &fixture, fixture.store_a);
        let repo = DieselOrderRepository::new(pool.clone());

        let err = repo
            .add_item(order_id, &item(fixture.product_id, 3, "379.99"))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InsufficientStock {
                requested: 3,
                available: 2
            }
        ));

        let view = repo.find_by_id(order_id).expect("find").expect("exists");
        assert!(view.order_items.is_empty());
        assert_eq!(stock_of(&pool, fixture.store_a, fixture.product_id), Some(2));
    }

    #[tokio::test]
    async fn add_item_needs_stock_row_in_order_store() {
        let (_container, pool) = setup_db().await;
        let fixture = seed(&pool);
        stocked(&pool, &fixture, 5);
        let order_id = create_order(&pool, &fixture, fixture.store_b);
        let repo = DieselOrderRepository::new(pool);

        let err = repo
            .add_item(order_id, &item(fixture.product_id, 1, "379.99"))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Stock")));

        let err = repo
            .add_item(order_id + 1, &item(fixture.product_id, 1, "379.99"))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Order")));
    }

    #[tokio::test]
    async fn remove_item_restocks_the_order_store() {
        let (_container, pool) = setup_db().await;
        let fixture = seed(&pool);
        stocked(&pool, &fixture, 4);
        let order_id = create_order(&pool, &fixture, fixture.store_a);
        let repo = DieselOrderRepository::new(pool.clone());
        let added = repo
            .add_item(order_id, &item(fixture.product_id, 4, "379.99"))
            .expect("add");
        assert_eq!(stock_of(&pool, fixture.store_a, fixture.product_id), Some(0));

        let removed = repo
            .remove_item(order_id, added.item_id)
            .expect("remove")
            .expect("item existed");
        assert_eq!(removed.quantity, 4);
        assert_eq!(stock_of(&pool, fixture.store_a, fixture.product_id), Some(4));
        assert!(repo
            .remove_item(order_id, added.item_id)
            .expect("remove")
            .is_none());
    }

    #[tokio::test]
    async fn line_amounts_feed_the_total() {
        let (_container, pool) = setup_db().await;
        let fixture = seed(&pool);
        let cheap = create_product(&pool, &fixture, "Bell Helmet", "10.00");
        let mut conn = pool.get().expect("connection");
        diesel::insert_into(stocks::table)
            .values(&StockRow {
                store_id: fixture.store_a,
                product_id: cheap,
                quantity: 10,
            })
            .execute(&mut conn)
            .expect("seed stock");
        drop(conn);
        let order_id = create_order(&pool, &fixture, fixture.store_a);
        let repo = DieselOrderRepository::new(pool);
        repo.add_item(order_id, &item(cheap, 2, "10.00")).expect("add");
        repo.add_item(order_id, &item(cheap, 1, "5.00")).expect("add");

        let lines = repo.line_amounts(order_id).expect("lines");
        assert_eq!(crate::domain::pricing::subtotal(&lines), dec("25.00"));
        assert!(repo.line_amounts(order_id + 1).expect("lines").is_empty());
    }

    #[tokio::test]
    async fn view_snapshot_includes_parties_and_items() {
        let (_container, pool) = setup_db().await;
        let fixture = seed(&pool);
        stocked(&pool, &fixture, 1);
        let order_id = create_order(&pool, &fixture, fixture.store_a);
        let repo = DieselOrderRepository::new(pool);
        repo.add_item(order_id, &item(fixture.product_id, 1, "379.99"))
            .expect("add");

        let view = repo.find_by_id(order_id).expect("find").expect("exists");
        assert_eq!(view.customer_data.last_name, "Burks");
        assert_eq!(view.store_data.store_id, fixture.store_a);
        assert_eq!(view.staff_data.staff_id, fixture.staff_id);
        assert_eq!(view.order_items.len(), 1);
        assert!(repo.find_by_id(order_id + 1).expect("find").is_none());
    }

    #[tokio::test]
    async fn patch_and_update_keep_order_date() {
        let (_container, pool) = setup_db().await;
        let fixture = seed(&pool);
        let order_id = create_order(&pool, &fixture, fixture.store_a);
        let repo = DieselOrderRepository::new(pool);
        let placed = repo
            .find_by_id(order_id)
            .expect("find")
            .expect("exists")
            .order
            .order_date;

        let fields = json!({"order_status": 4, "shipped_date": "2030-01-02"});
        let patch = PatchSet::build(&ORDER_PATCH, order_id, fields.as_object().expect("object"))
            .expect("valid patch");
        assert_eq!(repo.patch(&patch).expect("patch"), 1);

        let order = repo.find_by_id(order_id).expect("find").expect("exists").order;
        assert_eq!(order.order_status, 4);
        assert_eq!(order.shipped_date, Some(date("2030-01-02")));
        assert_eq!(order.order_date, placed);

        let input = OrderInput {
            customer_id: fixture.customer_id,
            order_status: 2,
            order_date: None,
            required_date: date("2030-02-01"),
            shipped_date: None,
            store_id: fixture.store_a,
            staff_id: fixture.staff_id,
            promo_code: None,
        };
        assert_eq!(repo.update(order_id, &input).expect("update"), 1);
        let order = repo.find_by_id(order_id).expect("find").expect("exists").order;
        assert_eq!(order.shipped_date, None);
        assert_eq!(order.order_date, placed);
    }

    #[tokio::test]
    async fn order_with_items_cannot_change_store() {
        let (_container, pool) = setup_db().await;
        let fixture = seed(&pool);
        stocked(&pool, &fixture, 10);
        let order_id = create_order(&pool, &fixture, fixture.store_a);
        let repo = DieselOrderRepository::new(pool.clone());
        let added = repo
            .add_item(order_id, &item(fixture.product_id, 4, "379.99"))
            .expect("add");

        let fields = json!({"store_id": fixture.store_b});
        let patch = PatchSet::build(&ORDER_PATCH, order_id, fields.as_object().expect("object"))
            .expect("valid patch");
        assert!(matches!(repo.patch(&patch), Err(DomainError::Conflict(_))));

        let mut input = OrderInput {
            customer_id: fixture.customer_id,
            order_status: 1,
            order_date: None,
            required_date: date("2030-01-03"),
            shipped_date: None,
            store_id: fixture.store_b,
            staff_id: fixture.staff_id,
            promo_code: None,
        };
        assert!(matches!(
            repo.update(order_id, &input),
            Err(DomainError::Conflict(_))
        ));

        // Same store is fine, and the reserved units still go home.
        input.store_id = fixture.store_a;
        assert_eq!(repo.update(order_id, &input).expect("update"), 1);
        repo.remove_item(order_id, added.item_id)
            .expect("remove")
            .expect("item existed");
        assert_eq!(stock_of(&pool, fixture.store_a, fixture.product_id), Some(10));
        assert_eq!(stock_of(&pool, fixture.store_b, fixture.product_id), None);

        // Once empty, the order may move.
        assert_eq!(repo.patch(&patch).expect("patch"), 1);
        let order = repo.find_by_id(order_id).expect("find").expect("exists").order;
        assert_eq!(order.store_id, fixture.store_b);
        assert_eq!(repo.update(order_id + 1, &input).expect("update"), 0);
    }

    #[tokio::test]
    async fn delete_cascades_to_items() {
        let (_container, pool) = setup_db().await;
        let fixture = seed(&pool);
        stocked(&pool, &fixture, 1);
        let order_id = create_order(&pool, &fixture, fixture.store_a);
        let repo = DieselOrderRepository::new(pool.clone());
        repo.add_item(order_id, &item(fixture.product_id, 1, "379.99"))
            .expect("add");

        assert_eq!(repo.delete(order_id).expect("delete"), 1);
        assert_eq!(repo.list(&ListQuery::default()).expect("list").count, 0);
        assert!(repo.line_amounts(order_id).expect("lines").is_empty());
    }
}
