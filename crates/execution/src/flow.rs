use journal_core::{
    ensure_not_empty, ensure_some, ensure_that, EvaluationReport, JournalError, OrderDraft,
    Price, PsychologicalGate, PsychologicalTestResult, RiskModel, Side, Strategy,
};
use journal_core::round2;
use journal_strategy::ConditionScorer;
use rust_decimal::Decimal;

/// 综合评分权重：心理 0.3 / 策略 0.4 / 风控 0.3
const PSYCH_WEIGHT: f64 = 0.3;
const STRATEGY_WEIGHT: f64 = 0.4;
const RISK_WEIGHT: f64 = 0.3;

/// 风控关是咨询性质，综合评分里恒按满分计
const RISK_FULL_SCORE: f64 = 100.0;

/// 评估流程当前所处步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    Psychological,
    Strategy,
    Risk,
    Details,
}

/// 填单信息 (最后一步收集)
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub symbol: String,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    /// 买入必填
    pub stop_loss_price: Option<Price>,
    pub take_profit_price: Option<Price>,
}

/// 预约单评估流程 (Reservation Flow)
///
/// 线性状态机：每一关校验通过才前进，失败原地拦下；
/// 可以随时 back() 回上一步，已记录的关卡结论不丢，重跑某一关只覆盖它自己的结论。
/// 卖出流程没有风控关 (平仓谈不上推仓)，策略关通过后直接进入填单。
pub struct ReservationFlow {
    side: Side,
    step: FlowStep,
    strategy_id: Option<String>,
    risk_model_id: Option<String>,
    report: EvaluationReport,
}

impl ReservationFlow {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            step: FlowStep::Psychological,
            strategy_id: None,
            risk_model_id: None,
            report: EvaluationReport::default(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    /// 已记录的关卡结论 (随流程推进逐项填充)
    pub fn report(&self) -> &EvaluationReport {
        &self.report
    }

    /// 心理关：取最近一次心理测试，没有测试或测试未通过都拦下 (fail closed)。
    /// 结论先记录再判定，失败留痕供界面展示。
    pub fn check_psychology(
        &mut self,
        latest: Option<&PsychologicalTestResult>,
    ) -> Result<(), JournalError> {
        self.expect_step(FlowStep::Psychological)?;

        let test = latest.ok_or(JournalError::NoPsychologicalTest)?;
        self.report.psychological = Some(PsychologicalGate {
            pass: test.pass,
            score: test.overall_score,
        });

        if !test.pass {
            return Err(JournalError::GateRejected {
                gate: "psychological",
                detail: format!("最近一次心理测试未通过 ({} 分)", test.overall_score),
            });
        }

        self.step = FlowStep::Strategy;
        Ok(())
    }

    /// 策略关：条件逐项打分、加权汇总，总分达到策略及格线才放行。
    pub fn check_strategy(
        &mut self,
        strategy: &Strategy,
        scorer: &dyn ConditionScorer,
    ) -> Result<(), JournalError> {
        self.expect_step(FlowStep::Strategy)?;

        let gate = journal_strategy::evaluate(strategy, scorer);
        let pass = gate.pass;
        let score = gate.score;
        self.strategy_id = Some(strategy.id.clone());
        self.report.strategy = Some(gate);

        if !pass {
            return Err(JournalError::GateRejected {
                gate: "strategy",
                detail: format!("加权总分 {score} 未达及格线 {}", strategy.pass_score),
            });
        }

        self.step = match self.side {
            Side::Buy => FlowStep::Risk,
            Side::Sell => FlowStep::Details,
        };
        Ok(())
    }

    /// 风控关 (仅买入流程会走到)：按模型推建议仓位，必然放行。
    pub fn check_risk(
        &mut self,
        model: &RiskModel,
        balance: Decimal,
        price: Price,
        stop_loss: Price,
    ) -> Result<(), JournalError> {
        self.expect_step(FlowStep::Risk)?;

        let gate = journal_risk::position_size(balance, model, price, stop_loss)?;
        self.risk_model_id = Some(model.id.clone());
        self.report.risk = Some(gate);

        self.step = FlowStep::Details;
        Ok(())
    }

    /// 回到上一步。已记录的关卡结论保留，重新评估时各关只覆盖自己的条目。
    pub fn back(&mut self) {
        self.step = match self.step {
            FlowStep::Details => match self.side {
                Side::Buy => FlowStep::Risk,
                Side::Sell => FlowStep::Strategy,
            },
            FlowStep::Risk => FlowStep::Strategy,
            FlowStep::Strategy | FlowStep::Psychological => FlowStep::Psychological,
        };
    }

    /// 提交填单信息，产出订单草稿。
    ///
    /// 综合评分 = 心理×0.3 + 策略×0.4 + 100×0.3 (风控恒满分)。
    pub fn submit(&self, details: OrderDetails) -> Result<OrderDraft, JournalError> {
        self.expect_step(FlowStep::Details)?;

        ensure_not_empty!(details.symbol, "资产代码不能为空");
        ensure_not_empty!(details.name, "资产名称不能为空");
        if !details.price.is_positive() {
            return Err(JournalError::InvalidPrice(details.price));
        }
        if details.quantity == 0 {
            return Err(JournalError::InvalidQuantity(details.quantity));
        }
        if self.side == Side::Buy {
            ensure_some!(details.stop_loss_price, "买入预约必须填写止损价");
            if let Some(stop) = details.stop_loss_price {
                ensure_that!(
                    stop < details.price,
                    "止损价 {} 必须低于买入价 {}",
                    stop,
                    details.price
                );
            }
        }

        let psychological = self
            .report
            .psychological
            .as_ref()
            .ok_or_else(|| JournalError::FlowStepMismatch("心理关结论缺失".to_string()))?;
        let strategy = self
            .report
            .strategy
            .as_ref()
            .ok_or_else(|| JournalError::FlowStepMismatch("策略关结论缺失".to_string()))?;
        let strategy_id = self
            .strategy_id
            .clone()
            .ok_or_else(|| JournalError::FlowStepMismatch("未选定策略".to_string()))?;

        let overall = round2(
            psychological.score * PSYCH_WEIGHT
                + strategy.score * STRATEGY_WEIGHT
                + RISK_FULL_SCORE * RISK_WEIGHT,
        );

        Ok(OrderDraft {
            symbol: details.symbol,
            name: details.name,
            side: self.side,
            price: details.price,
            stop_loss_price: details.stop_loss_price,
            take_profit_price: details.take_profit_price,
            quantity: details.quantity,
            strategy_id,
            risk_model_id: self.risk_model_id.clone(),
            psychological_score: psychological.score,
            strategy_score: strategy.score,
            risk_score: RISK_FULL_SCORE,
            overall_score: overall,
            evaluation: self.report.clone(),
        })
    }

    fn expect_step(&self, expected: FlowStep) -> Result<(), JournalError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(JournalError::FlowStepMismatch(format!(
                "期望 {:?}，当前 {:?}",
                expected, self.step
            )))
        }
    }
}
