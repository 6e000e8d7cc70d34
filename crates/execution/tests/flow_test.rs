use std::collections::BTreeMap;

use journal_core::{
    Condition, JournalError, Price, PsychologicalTestResult, RiskModel, Side, Strategy,
};
use journal_execution::{FlowStep, OrderDetails, ReservationFlow};
use journal_strategy::FixedScorer;
use rust_decimal_macros::dec;

// --- 测试数据 ---

fn test_result(score: f64) -> PsychologicalTestResult {
    PsychologicalTestResult {
        id: "t1".to_string(),
        scores: BTreeMap::new(),
        overall_score: score,
        pass: score >= 70.0,
        date: chrono::Utc::now(),
    }
}

fn strategy(weights: &[f64]) -> Strategy {
    Strategy {
        id: "s1".to_string(),
        name: "趋势突破策略".to_string(),
        description: String::new(),
        conditions: weights
            .iter()
            .enumerate()
            .map(|(i, w)| Condition {
                id: format!("c{i}"),
                name: format!("条件{i}"),
                weight: *w,
                threshold: 70.0,
                description: String::new(),
            })
            .collect(),
        pass_score: 70.0,
    }
}

fn risk_model() -> RiskModel {
    RiskModel {
        id: "r1".to_string(),
        name: "平衡型".to_string(),
        description: String::new(),
        max_loss_percent: 2.0,
        position_size: 0.2,
    }
}

fn details(stop_loss: Option<Price>) -> OrderDetails {
    OrderDetails {
        symbol: "AAPL".to_string(),
        name: "苹果公司".to_string(),
        price: Price(dec!(100)),
        quantity: 10,
        stop_loss_price: stop_loss,
        take_profit_price: None,
    }
}

// --- Test Cases ---

#[test]
fn buy_flow_happy_path() {
    let mut flow = ReservationFlow::new(Side::Buy);

    flow.check_psychology(Some(&test_result(80.0))).unwrap();
    assert_eq!(flow.step(), FlowStep::Strategy);

    flow.check_strategy(&strategy(&[0.3, 0.3, 0.4]), &FixedScorer(85.0))
        .unwrap();
    assert_eq!(flow.step(), FlowStep::Risk);

    flow.check_risk(&risk_model(), dec!(100000), Price(dec!(100)), Price(dec!(95)))
        .unwrap();
    assert_eq!(flow.step(), FlowStep::Details);

    let draft = flow.submit(details(Some(Price(dec!(95))))).unwrap();

    // 综合评分 = 80×0.3 + 85×0.4 + 100×0.3
    assert_eq!(draft.overall_score, 88.0);
    assert_eq!(draft.psychological_score, 80.0);
    assert_eq!(draft.strategy_score, 85.0);
    assert_eq!(draft.risk_score, 100.0);
    assert_eq!(draft.side, Side::Buy);
    assert_eq!(draft.strategy_id, "s1");
    assert_eq!(draft.risk_model_id.as_deref(), Some("r1"));

    let risk = draft.evaluation.risk.expect("risk gate recorded");
    assert_eq!(risk.max_loss, dec!(2000));
    assert_eq!(risk.max_quantity, 400);
    assert!(draft.evaluation.psychological.is_some());
    assert!(draft.evaluation.strategy.is_some());
}

#[test]
fn sell_flow_skips_risk_gate() {
    let mut flow = ReservationFlow::new(Side::Sell);

    flow.check_psychology(Some(&test_result(75.0))).unwrap();
    flow.check_strategy(&strategy(&[0.6, 0.4]), &FixedScorer(80.0))
        .unwrap();
    // 卖出流程：策略关通过后直接填单
    assert_eq!(flow.step(), FlowStep::Details);

    // 风控关对卖出流程关闭
    let err = flow
        .check_risk(&risk_model(), dec!(100000), Price(dec!(100)), Price(dec!(95)))
        .unwrap_err();
    assert!(matches!(err, JournalError::FlowStepMismatch(_)));

    let draft = flow.submit(details(None)).unwrap();
    assert_eq!(draft.overall_score, 84.5); // 75×0.3 + 80×0.4 + 100×0.3
    assert!(draft.risk_model_id.is_none());
    assert!(draft.evaluation.risk.is_none());
}

#[test]
fn psychological_gate_fails_closed_without_test() {
    let mut flow = ReservationFlow::new(Side::Buy);
    let err = flow.check_psychology(None).unwrap_err();
    assert!(matches!(err, JournalError::NoPsychologicalTest));
    assert_eq!(flow.step(), FlowStep::Psychological);
}

#[test]
fn failed_test_blocks_until_new_test_passes() {
    let mut flow = ReservationFlow::new(Side::Buy);

    let err = flow.check_psychology(Some(&test_result(60.0))).unwrap_err();
    assert!(matches!(err, JournalError::GateRejected { gate: "psychological", .. }));
    assert_eq!(flow.step(), FlowStep::Psychological);
    // 失败结论同样留痕
    let gate = flow.report().psychological.as_ref().unwrap();
    assert!(!gate.pass);
    assert_eq!(gate.score, 60.0);

    // 重新测试通过后同一关重跑即可前进
    flow.check_psychology(Some(&test_result(90.0))).unwrap();
    assert_eq!(flow.step(), FlowStep::Strategy);
}

#[test]
fn strategy_gate_blocks_below_pass_score() {
    let mut flow = ReservationFlow::new(Side::Buy);
    flow.check_psychology(Some(&test_result(80.0))).unwrap();

    let err = flow
        .check_strategy(&strategy(&[0.5, 0.5]), &FixedScorer(60.0))
        .unwrap_err();
    assert!(matches!(err, JournalError::GateRejected { gate: "strategy", .. }));
    assert_eq!(flow.step(), FlowStep::Strategy);
    assert!(!flow.report().strategy.as_ref().unwrap().pass);

    flow.check_strategy(&strategy(&[0.5, 0.5]), &FixedScorer(90.0))
        .unwrap();
    assert_eq!(flow.step(), FlowStep::Risk);
}

#[test]
fn back_navigation_keeps_recorded_results() {
    let mut flow = ReservationFlow::new(Side::Buy);
    flow.check_psychology(Some(&test_result(80.0))).unwrap();
    flow.check_strategy(&strategy(&[1.0]), &FixedScorer(85.0))
        .unwrap();
    flow.check_risk(&risk_model(), dec!(100000), Price(dec!(100)), Price(dec!(95)))
        .unwrap();
    assert_eq!(flow.step(), FlowStep::Details);

    flow.back();
    assert_eq!(flow.step(), FlowStep::Risk);
    flow.back();
    assert_eq!(flow.step(), FlowStep::Strategy);

    // 回退不清结论
    assert!(flow.report().psychological.is_some());
    assert!(flow.report().strategy.is_some());
    assert!(flow.report().risk.is_some());

    // 重跑策略关只覆盖自己的条目
    flow.check_strategy(&strategy(&[1.0]), &FixedScorer(72.0))
        .unwrap();
    flow.check_risk(&risk_model(), dec!(100000), Price(dec!(100)), Price(dec!(95)))
        .unwrap();
    let draft = flow.submit(details(Some(Price(dec!(95))))).unwrap();
    assert_eq!(draft.strategy_score, 72.0);
    assert_eq!(draft.psychological_score, 80.0);
}

#[test]
fn buy_order_requires_stop_loss() {
    let mut flow = ReservationFlow::new(Side::Buy);
    flow.check_psychology(Some(&test_result(80.0))).unwrap();
    flow.check_strategy(&strategy(&[1.0]), &FixedScorer(85.0))
        .unwrap();
    flow.check_risk(&risk_model(), dec!(100000), Price(dec!(100)), Price(dec!(95)))
        .unwrap();

    let err = flow.submit(details(None)).unwrap_err();
    assert!(matches!(err, JournalError::InvalidData(_)));
}

#[test]
fn gates_must_run_in_order() {
    let mut flow = ReservationFlow::new(Side::Buy);

    let err = flow
        .check_strategy(&strategy(&[1.0]), &FixedScorer(85.0))
        .unwrap_err();
    assert!(matches!(err, JournalError::FlowStepMismatch(_)));

    let err = flow
        .check_risk(&risk_model(), dec!(100000), Price(dec!(100)), Price(dec!(95)))
        .unwrap_err();
    assert!(matches!(err, JournalError::FlowStepMismatch(_)));

    let err = flow.submit(details(Some(Price(dec!(95))))).unwrap_err();
    assert!(matches!(err, JournalError::FlowStepMismatch(_)));
}

#[test]
fn degenerate_order_details_rejected() {
    let mut flow = ReservationFlow::new(Side::Buy);
    flow.check_psychology(Some(&test_result(80.0))).unwrap();
    flow.check_strategy(&strategy(&[1.0]), &FixedScorer(85.0))
        .unwrap();
    flow.check_risk(&risk_model(), dec!(100000), Price(dec!(100)), Price(dec!(95)))
        .unwrap();

    let mut zero_quantity = details(Some(Price(dec!(95))));
    zero_quantity.quantity = 0;
    assert!(matches!(
        flow.submit(zero_quantity).unwrap_err(),
        JournalError::InvalidQuantity(0)
    ));

    let mut free_lunch = details(Some(Price(dec!(95))));
    free_lunch.price = Price::ZERO;
    assert!(matches!(
        flow.submit(free_lunch).unwrap_err(),
        JournalError::InvalidPrice(_)
    ));
}
