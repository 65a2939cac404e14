use serde_json::{Map, Value};

use crate::domain::errors::{ensure_positive, require_affected, DomainError};
use crate::domain::order::{NewOrderItem, Order, OrderInput, OrderItem, OrderTotal, OrderView};
use crate::domain::page::{ListQuery, Page};
use crate::domain::patch::{PatchSet, ORDER_PATCH};
use crate::domain::ports::{OrderRepository, PromoCodeRepository};
use crate::domain::pricing;

pub struct OrderService<O, P> {
    orders: O,
    promo_codes: P,
}

impl<O: OrderRepository, P: PromoCodeRepository> OrderService<O, P> {
    pub fn new(orders: O, promo_codes: P) -> Self {
        Self {
            orders,
            promo_codes,
        }
    }

    pub fn create_order(&self, input: &OrderInput) -> Result<i32, DomainError> {
        input.validate()?;
        self.orders.create(input)
    }

    pub fn get_order(&self, id: i32) -> Result<OrderView, DomainError> {
        self.orders
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Order"))
    }

    pub fn list_orders(&self, query: &ListQuery) -> Result<Page<Order>, DomainError> {
        self.orders.list(query)
    }

    pub fn update_order(&self, id: i32, input: &OrderInput) -> Result<(), DomainError> {
        input.validate()?;
        require_affected(self.orders.update(id, input)?, "Order")
    }

    pub fn patch_order(&self, id: i32, fields: &Map<String, Value>) -> Result<(), DomainError> {
        let patch = PatchSet::build(&ORDER_PATCH, id, fields)?;
        require_affected(self.orders.patch(&patch)?, "Order")
    }

    pub fn delete_order(&self, id: i32) -> Result<(), DomainError> {
        require_affected(self.orders.delete(id)?, "Order")
    }

    pub fn add_item(&self, order_id: i32, item: &NewOrderItem) -> Result<OrderItem, DomainError> {
        ensure_positive("order_id", order_id)?;
        item.validate()?;
        match self.orders.add_item(order_id, item) {
            Ok(added) => {
                log::info!(
                    "order {} item {}: reserved {} x product {}",
                    order_id,
                    added.item_id,
                    added.quantity,
                    added.product_id
                );
                Ok(added)
            }
            Err(e) => {
                log::warn!(
                    "order {}: could not add {} x product {}: {}",
                    order_id,
                    item.quantity,
                    item.product_id,
                    e
                );
                Err(e)
            }
        }
    }

    pub fn remove_item(&self, order_id: i32, item_id: i32) -> Result<OrderItem, DomainError> {
        let removed = self
            .orders
            .remove_item(order_id, item_id)?
            .ok_or(DomainError::NotFound("Order item"))?;
        log::info!(
            "order {} item {} removed, restocked {} x product {}",
            order_id,
            item_id,
            removed.quantity,
            removed.product_id
        );
        Ok(removed)
    }

    /// Sum of the order's items with the named promo code applied.
    ///
    /// An unknown promo code is not an error: the total is returned without
    /// discount and `promo_code` is `None`.
    pub fn order_total(
        &self,
        order_id: i32,
        promo_code: Option<&str>,
    ) -> Result<OrderTotal, DomainError> {
        let lines = self.orders.line_amounts(order_id)?;
        if lines.is_empty() {
            return Err(DomainError::NotFound("Order"));
        }
        let subtotal = pricing::subtotal(&lines);

        let promo = match promo_code.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => {
                let found = self.promo_codes.find_by_name(name)?;
                if found.is_none() {
                    log::debug!("order {}: promo code '{}' not found", order_id, name);
                }
                found
            }
            None => None,
        };

        let total = match &promo {
            Some(code) => pricing::apply_discount(&subtotal, code),
            None => subtotal.clone(),
        };

        Ok(OrderTotal {
            order_id,
            subtotal: pricing::round_total(&subtotal),
            promo_code: promo.map(|code| code.code_name),
            total: pricing::round_total(&total),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::domain::patch::PatchSet;
    use crate::domain::pricing::LineAmount;
    use crate::domain::promo_code::{PromoCode, PromoCodeInput};

    struct FakeOrders {
        lines: Vec<(&'static str, i32)>,
    }

    impl OrderRepository for FakeOrders {
        fn create(&self, _: &OrderInput) -> Result<i32, DomainError> {
            Ok(1)
        }
        fn find_by_id(&self, _: i32) -> Result<Option<OrderView>, DomainError> {
            Ok(None)
        }
        fn list(&self, _: &ListQuery) -> Result<Page<Order>, DomainError> {
            Ok(Page {
                count: 0,
                items: vec![],
            })
        }
        fn update(&self, _: i32, _: &OrderInput) -> Result<usize, DomainError> {
            Ok(0)
        }
        fn patch(&self, _: &PatchSet) -> Result<usize, DomainError> {
            panic!("patch must not reach the repository in these tests")
        }
        fn delete(&self, _: i32) -> Result<usize, DomainError> {
            Ok(0)
        }
        fn add_item(&self, _: i32, _: &NewOrderItem) -> Result<OrderItem, DomainError> {
            panic!("add_item must not reach the repository in these tests")
        }
        fn remove_item(&self, _: i32, _: i32) -> Result<Option<OrderItem>, DomainError> {
            Ok(None)
        }
        fn line_amounts(&self, _: i32) -> Result<Vec<LineAmount>, DomainError> {
            Ok(self
                .lines
                .iter()
                .map(|(price, quantity)| LineAmount {
                    list_price: BigDecimal::from_str(price).expect("valid decimal"),
                    quantity: *quantity,
                })
                .collect())
        }
    }

    struct FakePromoCodes(Vec<PromoCode>);

    impl PromoCodeRepository for FakePromoCodes {
        fn create(&self, _: &PromoCodeInput) -> Result<i32, DomainError> {
            Ok(1)
        }
        fn find_by_id(&self, _: i32) -> Result<Option<PromoCode>, DomainError> {
            Ok(None)
        }
        fn find_by_name(&self, name: &str) -> Result<Option<PromoCode>, DomainError> {
            Ok(self
                .0
                .iter()
                .find(|code| code.code_name.eq_ignore_ascii_case(name))
                .cloned())
        }
        fn list(&self, _: &ListQuery) -> Result<Page<PromoCode>, DomainError> {
            Ok(Page {
                count: 0,
                items: vec![],
            })
        }
        fn update(&self, _: i32, _: &PromoCodeInput) -> Result<usize, DomainError> {
            Ok(0)
        }
        fn delete(&self, _: i32) -> Result<usize, DomainError> {
            Ok(0)
        }
    }

    fn service(
        lines: Vec<(&'static str, i32)>,
    ) -> OrderService<FakeOrders, FakePromoCodes> {
        let code = |name: &str, kind: &str, discount: &str, limit: &str| PromoCode {
            code_id: 1,
            code_name: name.to_string(),
            discount: BigDecimal::from_str(discount).expect("valid decimal"),
            discount_type: kind.to_string(),
            order_limit_price: BigDecimal::from_str(limit).expect("valid decimal"),
        };
        OrderService::new(
            FakeOrders { lines },
            FakePromoCodes(vec![
                code("TENOFF", "percent", "10", "0"),
                code("TWENTY", "fixed", "20", "50"),
            ]),
        )
    }

    #[test]
    fn total_without_promo_code() {
        let total = service(vec![("10", 2), ("5", 1)])
            .order_total(1, None)
            .expect("total");
        assert_eq!(total.total.to_string(), "25.00");
        assert_eq!(total.subtotal.to_string(), "25.00");
        assert!(total.promo_code.is_none());
    }

    #[test]
    fn promo_code_name_matches_case_insensitively() {
        let total = service(vec![("50", 2)])
            .order_total(1, Some("tenoff"))
            .expect("total");
        assert_eq!(total.total.to_string(), "90.00");
        assert_eq!(total.promo_code.as_deref(), Some("TENOFF"));
    }

    #[test]
    fn fixed_promo_code_respects_order_limit() {
        let svc = service(vec![("40", 1)]);
        assert_eq!(
            svc.order_total(1, Some("TWENTY")).expect("total").total.to_string(),
            "40.00"
        );
        let svc = service(vec![("100", 1)]);
        assert_eq!(
            svc.order_total(1, Some("TWENTY")).expect("total").total.to_string(),
            "80.00"
        );
    }

    #[test]
    fn unknown_promo_code_applies_no_discount() {
        let total = service(vec![("100", 1)])
            .order_total(1, Some("NOPE"))
            .expect("total");
        assert_eq!(total.total.to_string(), "100.00");
        assert!(total.promo_code.is_none());
    }

    #[test]
    fn blank_promo_code_is_ignored() {
        let total = service(vec![("100", 1)])
            .order_total(1, Some("   "))
            .expect("total");
        assert!(total.promo_code.is_none());
    }

    #[test]
    fn order_without_items_is_not_found() {
        let err = service(vec![]).order_total(1, None).unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Order")));
    }

    #[test]
    fn empty_patch_never_reaches_the_repository() {
        let err = service(vec![]).patch_order(1, &Map::new()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn non_positive_item_quantity_never_reaches_the_repository() {
        let item = NewOrderItem {
            product_id: 1,
            quantity: 0,
            list_price: BigDecimal::from(10),
            discount: BigDecimal::from(0),
        };
        let err = service(vec![]).add_item(1, &item).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn zero_rows_updated_is_not_found() {
        assert!(matches!(
            service(vec![]).delete_order(99),
            Err(DomainError::NotFound("Order"))
        ));
        assert!(matches!(
            service(vec![]).remove_item(99, 1),
            Err(DomainError::NotFound("Order item"))
        ));
    }
}
