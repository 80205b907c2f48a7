//! Trading condition — a user-defined rule with a trigger/entry/exit price
//! ladder and a small lifecycle.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Which side of the book a condition (and the signal it emits) acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side a position exit emits: the opposite of the entry side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// The tagged-union replacement for the source's three independent runtime
/// booleans (`is_trigger`, `is_ordered`, `is_exited`).
///
/// Collapsing them into one enum makes the impossible states (e.g. ordered
/// but not yet triggered) unrepresentable instead of merely "shouldn't
/// happen" — see Design Note §9 ("per-condition state machine with shared
/// storage").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionPhase {
    /// Neither triggered nor ordered. The only phase trailing updates apply in.
    Waiting,
    /// Trigger price has been touched; waiting for the order price to fire.
    Triggered,
    /// Order has been sent; waiting for take-profit or stop-loss.
    Open,
    /// Exit signal has been emitted. A condition in this phase is removed
    /// from the store in the same update cycle that reached it.
    Exited,
}

/// The user-configured, non-derived fields of a [`Condition`].
///
/// Separated from `Condition` itself so construction has a single place
/// that validates the fields and derives the price ladder — mirroring the
/// source's `__post_init__` validation, generalized into a fallible
/// constructor rather than a constructor that raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSpec {
    pub action: Side,
    pub trigger_price: i64,
    pub turning_point: i64,
    pub quantity: i64,
    pub take_profit_point: i64,
    pub stop_loss_point: i64,
    pub is_following: bool,
}

impl ConditionSpec {
    /// Defaults lifted from the original implementation's dataclass field
    /// defaults (`turning_point=15, take_profit_point=90, stop_loss_point=30`).
    pub fn new(action: Side, trigger_price: i64, quantity: i64) -> Self {
        Self {
            action,
            trigger_price,
            turning_point: 15,
            quantity,
            take_profit_point: 90,
            stop_loss_point: 30,
            is_following: false,
        }
    }
}

/// A trading condition: identity, configured thresholds, derived price
/// ladder, and lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub condition_id: Uuid,
    pub action: Side,
    pub trigger_price: i64,
    pub turning_point: i64,
    pub quantity: i64,
    pub take_profit_point: i64,
    pub stop_loss_point: i64,
    pub is_following: bool,
    pub order_price: i64,
    pub take_profit_price: i64,
    pub stop_loss_price: i64,
    pub phase: ConditionPhase,
}

impl Condition {
    /// Constructs a new condition with a fresh id, deriving the price ladder
    /// from `spec` and validating the direction invariant.
    pub fn new(condition_id: Uuid, spec: ConditionSpec) -> Result<Self, CoreError> {
        if spec.quantity < 1 {
            return Err(CoreError::InvalidQuantity(spec.quantity));
        }
        let (order_price, take_profit_price, stop_loss_price) = derive_prices(
            spec.action,
            spec.trigger_price,
            spec.turning_point,
            spec.take_profit_point,
            spec.stop_loss_point,
        );
        let condition = Self {
            condition_id,
            action: spec.action,
            trigger_price: spec.trigger_price,
            turning_point: spec.turning_point,
            quantity: spec.quantity,
            take_profit_point: spec.take_profit_point,
            stop_loss_point: spec.stop_loss_point,
            is_following: spec.is_following,
            order_price,
            take_profit_price,
            stop_loss_price,
            phase: ConditionPhase::Waiting,
        };
        condition.check_direction_invariant()?;
        Ok(condition)
    }

    fn check_direction_invariant(&self) -> Result<(), CoreError> {
        let ok = match self.action {
            Side::Buy => self.stop_loss_price < self.order_price && self.order_price < self.take_profit_price,
            Side::Sell => self.take_profit_price < self.order_price && self.order_price < self.stop_loss_price,
        };
        if ok {
            Ok(())
        } else {
            Err(CoreError::InvalidConditionSpec(format!(
                "action={:?} order={} tp={} sl={}",
                self.action, self.order_price, self.take_profit_price, self.stop_loss_price
            )))
        }
    }

    /// Recomputes the order/take-profit/stop-loss ladder from a new trigger
    /// price, as trailing updates do. Does not touch `phase`.
    pub fn reprice_from_trigger(&mut self, new_trigger_price: i64) {
        self.trigger_price = new_trigger_price;
        let (order_price, take_profit_price, stop_loss_price) = derive_prices(
            self.action,
            self.trigger_price,
            self.turning_point,
            self.take_profit_point,
            self.stop_loss_point,
        );
        self.order_price = order_price;
        self.take_profit_price = take_profit_price;
        self.stop_loss_price = stop_loss_price;
    }

    pub fn is_trigger(&self) -> bool {
        !matches!(self.phase, ConditionPhase::Waiting)
    }

    pub fn is_ordered(&self) -> bool {
        matches!(self.phase, ConditionPhase::Open | ConditionPhase::Exited)
    }

    pub fn is_exited(&self) -> bool {
        matches!(self.phase, ConditionPhase::Exited)
    }
}

/// Shared price-ladder derivation used both at construction and by trailing
/// updates: BUY moves up from trigger, SELL moves down.
fn derive_prices(
    action: Side,
    trigger_price: i64,
    turning_point: i64,
    take_profit_point: i64,
    stop_loss_point: i64,
) -> (i64, i64, i64) {
    match action {
        Side::Buy => {
            let order_price = trigger_price + turning_point;
            (
                order_price,
                order_price + take_profit_point,
                order_price - stop_loss_point,
            )
        }
        Side::Sell => {
            let order_price = trigger_price - turning_point;
            (
                order_price,
                order_price - take_profit_point,
                order_price + stop_loss_point,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_condition_derives_prices_per_scenario_1() {
        let spec = ConditionSpec {
            action: Side::Buy,
            trigger_price: 18000,
            turning_point: 50,
            quantity: 1,
            take_profit_point: 100,
            stop_loss_point: 50,
            is_following: false,
        };
        let c = Condition::new(Uuid::new_v4(), spec).unwrap();
        assert_eq!(c.order_price, 18050);
        assert_eq!(c.take_profit_price, 18150);
        assert_eq!(c.stop_loss_price, 18000);
    }

    #[test]
    fn sell_condition_derives_prices_per_scenario_2() {
        let spec = ConditionSpec {
            action: Side::Sell,
            trigger_price: 18100,
            turning_point: 50,
            quantity: 1,
            take_profit_point: 100,
            stop_loss_point: 50,
            is_following: false,
        };
        let c = Condition::new(Uuid::new_v4(), spec).unwrap();
        assert_eq!(c.order_price, 18050);
        assert_eq!(c.take_profit_price, 17950);
        assert_eq!(c.stop_loss_price, 18100);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let spec = ConditionSpec::new(Side::Buy, 18000, 0);
        assert!(matches!(
            Condition::new(Uuid::new_v4(), spec),
            Err(CoreError::InvalidQuantity(0))
        ));
    }

    #[test]
    fn zero_points_violate_the_strict_direction_invariant() {
        let spec = ConditionSpec {
            action: Side::Buy,
            trigger_price: 18000,
            turning_point: 50,
            quantity: 1,
            take_profit_point: 0,
            stop_loss_point: 30,
            is_following: false,
        };
        assert!(matches!(
            Condition::new(Uuid::new_v4(), spec),
            Err(CoreError::InvalidConditionSpec(_))
        ));
    }

    #[test]
    fn opposite_side_flips() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }
}
