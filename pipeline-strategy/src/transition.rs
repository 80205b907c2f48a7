//! The per-condition transition rules (§4.4), as a pure function so the six
//! end-to-end scenarios can be exercised without any transport or storage.

use rust_decimal::Decimal;

use pipeline_core::{Condition, ConditionPhase, Side, Tick, TradingSignal};

/// Applies one tick to one condition, returning the (possibly mutated)
/// condition and the signal to emit, if any.
///
/// A single tick advances a condition by at most one state edge, except for
/// a following condition's trailing adjustment, which moves the price
/// ladder without changing phase at all — see the note on
/// [`apply_waiting`].
pub fn transition(condition: &Condition, tick: &Tick) -> (Condition, Option<TradingSignal>) {
    let mut next = *condition;
    let price = price_as_i64(tick.match_price);

    let signal = match next.phase {
        ConditionPhase::Waiting => apply_waiting(&mut next, price),
        ConditionPhase::Triggered => apply_triggered(&mut next, price),
        ConditionPhase::Open => apply_open(&mut next, price),
        ConditionPhase::Exited => false,
    };

    let signal = signal.then(|| TradingSignal::new(tick.observed_at, signal_side(&next), tick.commodity_id.clone()));
    (next, signal)
}

fn signal_side(condition: &Condition) -> Side {
    match condition.phase {
        ConditionPhase::Open => condition.action,
        ConditionPhase::Exited => condition.action.opposite(),
        _ => condition.action,
    }
}

/// While `Waiting`, a plain condition only checks whether the trigger price
/// has been touched. A *following* condition instead trails: as long as
/// price keeps moving in the entry's favor (`p <= trigger_price` for BUY,
/// `p >= trigger_price` for SELL), it pulls the trigger (and the whole
/// price ladder) toward the market rather than firing. Only once price
/// reverses back past the trailed trigger does the condition check the
/// (now much closer) order price — and since that reversal can itself be
/// large enough to clear the order price in the same tick, a following
/// condition may jump straight from `Waiting` to `Open`, skipping
/// `Triggered` (see scenario 3 in the testable properties).
fn apply_waiting(condition: &mut Condition, price: i64) -> bool {
    if condition.is_following {
        let still_pulling_back = match condition.action {
            Side::Buy => price <= condition.trigger_price,
            Side::Sell => price >= condition.trigger_price,
        };
        if still_pulling_back {
            condition.reprice_from_trigger(price);
            return false;
        }
        if reached(condition.action, price, condition.order_price) {
            condition.phase = ConditionPhase::Open;
            return true;
        }
        return false;
    }

    let triggered = match condition.action {
        Side::Buy => price <= condition.trigger_price,
        Side::Sell => price >= condition.trigger_price,
    };
    if triggered {
        condition.phase = ConditionPhase::Triggered;
    }
    false
}

fn apply_triggered(condition: &mut Condition, price: i64) -> bool {
    if reached(condition.action, price, condition.order_price) {
        condition.phase = ConditionPhase::Open;
        true
    } else {
        false
    }
}

/// Take-profit is checked before stop-loss. The direction invariant
/// (`stop_loss < order < take_profit` for BUY, the mirror for SELL) means a
/// correctly-configured condition can never have both fire on the same
/// price; this ordering only matters for a misconfigured one, where it is
/// the documented tie-break.
fn apply_open(condition: &mut Condition, price: i64) -> bool {
    let tp_hit = match condition.action {
        Side::Buy => price >= condition.take_profit_price,
        Side::Sell => price <= condition.take_profit_price,
    };
    let sl_hit = match condition.action {
        Side::Buy => price <= condition.stop_loss_price,
        Side::Sell => price >= condition.stop_loss_price,
    };
    if tp_hit {
        condition.phase = ConditionPhase::Exited;
        true
    } else if sl_hit {
        condition.phase = ConditionPhase::Exited;
        true
    } else {
        false
    }
}

/// BUY reaches its order price moving up; SELL reaches it moving down.
fn reached(action: Side, price: i64, order_price: i64) -> bool {
    match action {
        Side::Buy => price >= order_price,
        Side::Sell => price <= order_price,
    }
}

fn price_as_i64(price: Decimal) -> i64 {
    use rust_decimal::prelude::ToPrimitive;
    price.round().to_i64().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pipeline_core::ConditionSpec;
    use uuid::Uuid;

    fn tick(price: i64) -> Tick {
        Tick {
            commodity_id: "WINZ25".to_string(),
            match_price: Decimal::from(price),
            observed_at: Utc::now(),
        }
    }

    fn condition(spec: ConditionSpec) -> Condition {
        Condition::new(Uuid::new_v4(), spec).unwrap()
    }

    #[test]
    fn scenario_1_buy_trigger_then_order_then_take_profit() {
        let spec = ConditionSpec {
            action: Side::Buy,
            trigger_price: 18000,
            turning_point: 50,
            quantity: 1,
            take_profit_point: 100,
            stop_loss_point: 50,
            is_following: false,
        };
        let mut c = condition(spec);
        assert_eq!((c.order_price, c.take_profit_price, c.stop_loss_price), (18050, 18150, 18000));

        let mut signals = Vec::new();
        for price in [18100, 17990, 18060, 18200] {
            let (next, signal) = transition(&c, &tick(price));
            c = next;
            signals.push(signal);
        }

        assert!(signals[0].is_none());
        assert!(signals[1].is_none());
        assert_eq!(signals[2].as_ref().unwrap().operation, Side::Buy);
        assert_eq!(signals[3].as_ref().unwrap().operation, Side::Sell);
        assert_eq!(c.phase, ConditionPhase::Exited);
    }

    #[test]
    fn scenario_2_sell_trigger_then_order_then_stop_loss() {
        let spec = ConditionSpec {
            action: Side::Sell,
            trigger_price: 18100,
            turning_point: 50,
            quantity: 1,
            take_profit_point: 100,
            stop_loss_point: 50,
            is_following: false,
        };
        let mut c = condition(spec);
        assert_eq!((c.order_price, c.take_profit_price, c.stop_loss_price), (18050, 17950, 18100));

        let mut signals = Vec::new();
        for price in [18090, 18120, 18040, 18110] {
            let (next, signal) = transition(&c, &tick(price));
            c = next;
            signals.push(signal);
        }

        assert!(signals[0].is_none());
        assert!(signals[1].is_none());
        assert_eq!(signals[2].as_ref().unwrap().operation, Side::Sell);
        assert_eq!(signals[3].as_ref().unwrap().operation, Side::Buy);
        assert_eq!(c.phase, ConditionPhase::Exited);
    }

    #[test]
    fn scenario_3_trailing_buy_jumps_straight_to_open() {
        let spec = ConditionSpec {
            action: Side::Buy,
            trigger_price: 18000,
            turning_point: 50,
            quantity: 1,
            take_profit_point: 100,
            stop_loss_point: 50,
            is_following: true,
        };
        let mut c = condition(spec);

        let (next, signal) = transition(&c, &tick(17990));
        c = next;
        assert!(signal.is_none());
        assert_eq!((c.trigger_price, c.order_price), (17990, 18040));

        let (next, signal) = transition(&c, &tick(17970));
        c = next;
        assert!(signal.is_none());
        assert_eq!((c.trigger_price, c.order_price), (17970, 18020));

        let (next, signal) = transition(&c, &tick(17960));
        c = next;
        assert!(signal.is_none());
        assert_eq!((c.trigger_price, c.order_price), (17960, 18010));

        let (next, signal) = transition(&c, &tick(18015));
        c = next;
        assert_eq!(signal.unwrap().operation, Side::Buy);
        assert_eq!(c.phase, ConditionPhase::Open);
    }

    #[test]
    fn boundary_prices_exactly_equal_to_thresholds_fire() {
        let spec = ConditionSpec {
            action: Side::Buy,
            trigger_price: 18000,
            turning_point: 50,
            quantity: 1,
            take_profit_point: 100,
            stop_loss_point: 50,
            is_following: false,
        };
        let mut c = condition(spec);
        let (next, _) = transition(&c, &tick(18000));
        c = next;
        assert_eq!(c.phase, ConditionPhase::Triggered);

        let (next, signal) = transition(&c, &tick(18050));
        c = next;
        assert!(signal.is_some());
        assert_eq!(c.phase, ConditionPhase::Open);

        let (next, signal) = transition(&c, &tick(18000));
        assert!(signal.is_some());
        assert_eq!(next.phase, ConditionPhase::Exited);
    }

    #[test]
    fn misconfigured_condition_with_both_thresholds_hit_prefers_take_profit() {
        // Bypasses `Condition::new`'s direction invariant on purpose: a
        // well-formed condition can never have take-profit and stop-loss on
        // the same side of the order price, so this is the only way to
        // observe the tie-break.
        let mut c = condition(ConditionSpec::new(Side::Buy, 18000, 1));
        c.phase = ConditionPhase::Open;
        c.order_price = 18050;
        c.take_profit_price = 18040;
        c.stop_loss_price = 18060;

        let (next, signal) = transition(&c, &tick(18050));
        assert_eq!(next.phase, ConditionPhase::Exited);
        assert_eq!(signal.unwrap().operation, Side::Sell);
    }

    #[test]
    fn exited_condition_is_inert() {
        let spec = ConditionSpec::new(Side::Buy, 18000, 1);
        let mut c = condition(spec);
        c.phase = ConditionPhase::Exited;
        let (next, signal) = transition(&c, &tick(0));
        assert!(signal.is_none());
        assert_eq!(next.phase, ConditionPhase::Exited);
    }
}
