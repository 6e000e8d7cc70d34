use std::collections::{BTreeMap, HashSet};
use std::io::{Read, Write};

use chrono::NaiveDate;
use journal_core::{
    ensure_that, psychology, Account, Clock, DailyWorkRecord, JournalError, Order, OrderDraft,
    OrderStatus, PsychologicalIndicator, PsychologicalTestResult, RiskModel, Side, Strategy,
    StrategyBook, TradeRecord, Transaction, TransactionKind,
};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::seed;
use crate::snapshot::{JournalSnapshot, SnapshotStore};
use crate::spreadsheet::{self, ImportOutcome, RowError};

/// 订单执行回执：同一笔状态跃迁里产生的全部关联写入
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionReceipt {
    pub order_id: String,
    pub trade_id: String,
    pub transaction_id: String,
    /// 带符号现金流 (买入为负)
    pub cash_flow: Decimal,
    /// 执行后的账户余额
    pub balance: Decimal,
}

/// 表格导入结果：入库条数 + 问题行报告
#[derive(Debug)]
pub struct ImportReport {
    pub imported: usize,
    pub rejected: Vec<RowError>,
}

/// 状态存储 (Journal Store)
///
/// 持有全部九个领域集合，对外暴露变更操作。每次变更同步跑完后
/// 把整体快照写回持久层；写回失败只告警不回滚 —— 内存状态是事实源，
/// 落盘尽力而为。查不到目标的操作显式报错，绝不静默吞掉。
pub struct JournalStore {
    state: JournalSnapshot,
    persister: Box<dyn SnapshotStore>,
}

impl JournalStore {
    /// 打开存储：有快照则恢复，否则按出厂默认值初始化并立即落盘
    pub fn open(persister: Box<dyn SnapshotStore>) -> Result<Self, JournalError> {
        match persister.load()? {
            Some(state) => {
                info!(
                    orders = state.orders.len(),
                    transactions = state.transactions.len(),
                    "快照恢复完成"
                );
                Ok(Self { state, persister })
            }
            None => {
                info!("未发现快照，按出厂默认值初始化");
                let store = Self {
                    state: seed::initial_snapshot(),
                    persister,
                };
                store.persist();
                Ok(store)
            }
        }
    }

    // =====================================================================
    // 读取口 (供界面层与测试使用)
    // =====================================================================

    pub fn account(&self) -> &Account {
        &self.state.account
    }

    pub fn daily_work(&self) -> &[DailyWorkRecord] {
        &self.state.daily_work_data
    }

    pub fn psychological_indicators(&self) -> &[PsychologicalIndicator] {
        &self.state.psychological_indicators
    }

    pub fn psychological_tests(&self) -> &[PsychologicalTestResult] {
        &self.state.psychological_tests
    }

    /// 最近一次心理测试 (评估流程心理关的输入)
    pub fn latest_psychological_test(&self) -> Option<&PsychologicalTestResult> {
        self.state.psychological_tests.last()
    }

    pub fn strategies(&self) -> &StrategyBook {
        &self.state.strategies
    }

    pub fn risk_models(&self) -> &[RiskModel] {
        &self.state.risk_models
    }

    pub fn orders(&self) -> &[Order] {
        &self.state.orders
    }

    pub fn pending_orders(&self) -> impl Iterator<Item = &Order> {
        self.state.orders.iter().filter(|o| o.is_pending())
    }

    pub fn executed_orders(&self) -> impl Iterator<Item = &Order> {
        self.state
            .orders
            .iter()
            .filter(|o| o.status == OrderStatus::Executed)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn trade_records(&self) -> &[TradeRecord] {
        &self.state.trade_records
    }

    /// 当前全量状态 (只读视角)
    pub fn snapshot(&self) -> &JournalSnapshot {
        &self.state
    }

    // =====================================================================
    // 账户
    // =====================================================================

    /// 余额加减，不设上下限
    pub fn update_balance(&mut self, delta: Decimal) {
        self.state.account.apply(delta);
        self.persist();
    }

    // =====================================================================
    // 每日功课
    // =====================================================================

    /// 新增一条功课，日期重复直接拒收
    pub fn add_daily_work(
        &mut self,
        mut record: DailyWorkRecord,
    ) -> Result<&DailyWorkRecord, JournalError> {
        if self.state.daily_work_data.iter().any(|d| d.date == record.date) {
            return Err(JournalError::DuplicateDate(record.date));
        }
        record.id = Uuid::new_v4().to_string();
        self.state.daily_work_data.push(record);
        self.persist();
        Ok(self.state.daily_work_data.last().expect("just inserted"))
    }

    /// 批量导入 (增量合并)。批内或与存量撞日期则整批拒收 —— 行级
    /// 部分成功策略在表格导入层处理，到这里的批次应当已经干净。
    pub fn import_daily_work(
        &mut self,
        mut records: Vec<DailyWorkRecord>,
    ) -> Result<usize, JournalError> {
        let mut seen: HashSet<NaiveDate> =
            self.state.daily_work_data.iter().map(|d| d.date).collect();
        for record in &records {
            if !seen.insert(record.date) {
                return Err(JournalError::DuplicateDate(record.date));
            }
        }
        for record in &mut records {
            if record.id.is_empty() {
                record.id = Uuid::new_v4().to_string();
            }
        }

        let count = records.len();
        self.state.daily_work_data.extend(records);
        self.persist();
        Ok(count)
    }

    /// 整体替换一条功课的内容，id 保持不变
    pub fn update_daily_work(
        &mut self,
        id: &str,
        mut record: DailyWorkRecord,
    ) -> Result<(), JournalError> {
        let slot = self
            .state
            .daily_work_data
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| JournalError::DailyWorkNotFound(id.to_string()))?;
        record.id = slot.id.clone();
        *slot = record;
        self.persist();
        Ok(())
    }

    pub fn delete_daily_work(&mut self, id: &str) -> Result<(), JournalError> {
        let before = self.state.daily_work_data.len();
        self.state.daily_work_data.retain(|d| d.id != id);
        if self.state.daily_work_data.len() == before {
            return Err(JournalError::DailyWorkNotFound(id.to_string()));
        }
        self.persist();
        Ok(())
    }

    /// 批量删除，返回实际删除条数 (缺失的 id 直接跳过)
    pub fn delete_daily_work_batch(&mut self, ids: &[String]) -> usize {
        let before = self.state.daily_work_data.len();
        self.state.daily_work_data.retain(|d| !ids.contains(&d.id));
        let removed = before - self.state.daily_work_data.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    // =====================================================================
    // 心理测试
    // =====================================================================

    /// 录入一次心理测试。综合分与通过与否由存储按当前指标目录计算，
    /// 调用方只管交原始打分。
    pub fn add_psychological_test(
        &mut self,
        scores: BTreeMap<String, f64>,
    ) -> &PsychologicalTestResult {
        let overall =
            psychology::overall_score(&self.state.psychological_indicators, &scores);
        let result = PsychologicalTestResult {
            id: Uuid::new_v4().to_string(),
            scores,
            overall_score: overall,
            pass: overall >= psychology::PASS_SCORE,
            date: Clock::now(),
        };
        self.state.psychological_tests.push(result);
        self.persist();
        self.state.psychological_tests.last().expect("just inserted")
    }

    /// 整体替换一个心理指标。权重之和是否仍为 1 由调用方把关。
    pub fn update_psychological_indicator(
        &mut self,
        id: &str,
        mut indicator: PsychologicalIndicator,
    ) -> Result<(), JournalError> {
        indicator.validate()?;
        let slot = self
            .state
            .psychological_indicators
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| JournalError::IndicatorNotFound(id.to_string()))?;
        indicator.id = slot.id.clone();
        *slot = indicator;
        self.persist();
        Ok(())
    }

    // =====================================================================
    // 策略与风险模型目录
    // =====================================================================

    pub fn add_strategy(&mut self, side: Side, mut strategy: Strategy) -> &Strategy {
        strategy.id = Uuid::new_v4().to_string();
        self.state.strategies.side_mut(side).push(strategy);
        self.persist();
        self.state
            .strategies
            .side(side)
            .last()
            .expect("just inserted")
    }

    pub fn delete_strategy(&mut self, side: Side, id: &str) -> Result<(), JournalError> {
        let book = self.state.strategies.side_mut(side);
        let before = book.len();
        book.retain(|s| s.id != id);
        if self.state.strategies.side(side).len() == before {
            return Err(JournalError::StrategyNotFound(id.to_string()));
        }
        self.persist();
        Ok(())
    }

    pub fn add_risk_model(&mut self, mut model: RiskModel) -> &RiskModel {
        model.id = Uuid::new_v4().to_string();
        self.state.risk_models.push(model);
        self.persist();
        self.state.risk_models.last().expect("just inserted")
    }

    pub fn delete_risk_model(&mut self, id: &str) -> Result<(), JournalError> {
        let before = self.state.risk_models.len();
        self.state.risk_models.retain(|m| m.id != id);
        if self.state.risk_models.len() == before {
            return Err(JournalError::RiskModelNotFound(id.to_string()));
        }
        self.persist();
        Ok(())
    }

    // =====================================================================
    // 预约单
    // =====================================================================

    /// 创建预约单：状态强制 pending，id 与创建时间由存储分配
    pub fn add_order(&mut self, draft: OrderDraft) -> &Order {
        let order = Order::from_draft(Uuid::new_v4().to_string(), draft, Clock::now());
        self.state.orders.push(order);
        self.persist();
        self.state.orders.last().expect("just inserted")
    }

    /// 执行预约单 —— 唯一的复合变更。
    ///
    /// 全部衍生写入从同一份执行前状态推出，作为一次状态跃迁一起生效：
    /// 1. 订单 pending → executed；
    /// 2. 追加一条交易记录 (三项评分随单带入，profit 置 0)；
    /// 3. 追加一笔账单 (买入为负现金流、卖出为正，balance 取落账后快照)；
    /// 4. 账户余额按同一现金流变动。
    pub fn execute_order(&mut self, id: &str) -> Result<ExecutionReceipt, JournalError> {
        let order = self
            .state
            .orders
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| JournalError::OrderNotFound(id.to_string()))?;
        if !order.is_pending() {
            return Err(JournalError::InvalidOrderStatus {
                id: order.id.clone(),
                status: order.status,
            });
        }

        // 从执行前快照推导，避免同一跃迁内部读到写后的值
        let gross = order.amount();
        let cash_flow = match order.side {
            Side::Buy => -gross,
            Side::Sell => gross,
        };
        let balance_after = self.state.account.balance + cash_flow;
        let executed_at = Clock::now();

        let trade = TradeRecord {
            id: Uuid::new_v4().to_string(),
            side: order.side,
            symbol: order.symbol.clone(),
            price: order.price,
            quantity: order.quantity,
            amount: gross,
            psychological_score: order.psychological_score,
            strategy_score: order.strategy_score,
            risk_score: order.risk_score,
            overall_score: order.overall_score,
            executed_at,
            profit: Decimal::ZERO,
        };
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            kind: match order.side {
                Side::Buy => TransactionKind::Buy,
                Side::Sell => TransactionKind::Sell,
            },
            symbol: Some(order.symbol.clone()),
            amount: cash_flow,
            description: Some(order.name.clone()),
            balance: balance_after,
            created_at: executed_at,
        };
        let receipt = ExecutionReceipt {
            order_id: order.id.clone(),
            trade_id: trade.id.clone(),
            transaction_id: transaction.id.clone(),
            cash_flow,
            balance: balance_after,
        };

        // 统一生效
        let order = self
            .state
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .expect("looked up above");
        order.status = OrderStatus::Executed;
        order.executed_at = Some(executed_at);
        self.state.trade_records.push(trade);
        self.state.transactions.push(transaction);
        self.state.account.balance = balance_after;
        self.persist();

        info!(
            order_id = %receipt.order_id,
            cash_flow = %receipt.cash_flow,
            balance = %receipt.balance,
            "预约单执行完成"
        );
        Ok(receipt)
    }

    /// 取消预约单：pending → cancelled，不产生任何账务
    pub fn cancel_order(&mut self, id: &str) -> Result<(), JournalError> {
        let order = self
            .state
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| JournalError::OrderNotFound(id.to_string()))?;
        if !order.is_pending() {
            return Err(JournalError::InvalidOrderStatus {
                id: order.id.clone(),
                status: order.status,
            });
        }

        order.status = OrderStatus::Cancelled;
        order.cancelled_at = Some(Clock::now());
        self.persist();
        Ok(())
    }

    // =====================================================================
    // 账单与交易记录
    // =====================================================================

    /// 手工记一笔出入金。amount 带符号：入账必须为正，出账必须为负；
    /// 买入/卖出账单由订单执行落账，不接受手工录入。
    pub fn add_transaction(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<&Transaction, JournalError> {
        ensure_that!(kind.is_manual(), "账单类型 {kind} 只能由订单执行落账");
        match kind {
            TransactionKind::Deposit => {
                ensure_that!(amount > Decimal::ZERO, "入账金额必须为正: {amount}")
            }
            TransactionKind::Withdrawal => {
                ensure_that!(amount < Decimal::ZERO, "出账金额必须为负: {amount}")
            }
            _ => unreachable!("is_manual checked above"),
        }

        let balance_after = self.state.account.balance + amount;
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            kind,
            symbol: None,
            amount,
            description,
            balance: balance_after,
            created_at: Clock::now(),
        };
        self.state.transactions.push(transaction);
        self.state.account.balance = balance_after;
        self.persist();
        Ok(self.state.transactions.last().expect("just inserted"))
    }

    /// 回填一笔交易的已实现盈亏 —— 纯复盘标注，不触碰账户余额
    pub fn set_trade_profit(
        &mut self,
        trade_id: &str,
        profit: Decimal,
    ) -> Result<(), JournalError> {
        let trade = self
            .state
            .trade_records
            .iter_mut()
            .find(|t| t.id == trade_id)
            .ok_or_else(|| JournalError::TradeNotFound(trade_id.to_string()))?;
        trade.profit = profit;
        self.persist();
        Ok(())
    }

    // =====================================================================
    // 重置
    // =====================================================================

    /// 一键重置：目录回到出厂默认，日志全部清空
    pub fn reset_data(&mut self) {
        self.state = seed::initial_snapshot();
        self.persist();
        info!("全部数据已重置为出厂默认");
    }

    // =====================================================================
    // 表格导入导出
    // =====================================================================

    /// 导入每日功课表格：合法行入库，问题行进错误报告返回
    pub fn import_spreadsheet(
        &mut self,
        reader: impl Read,
    ) -> Result<ImportReport, JournalError> {
        let existing: HashSet<NaiveDate> =
            self.state.daily_work_data.iter().map(|d| d.date).collect();
        let ImportOutcome { accepted, rejected } = spreadsheet::import(reader, &existing)?;

        let imported = accepted.len();
        if imported > 0 {
            self.state.daily_work_data.extend(accepted);
            self.persist();
        }
        if !rejected.is_empty() {
            warn!(rejected = rejected.len(), "部分表格行未通过校验");
        }
        info!(imported, rejected = rejected.len(), "表格导入完成");
        Ok(ImportReport { imported, rejected })
    }

    /// 导出每日功课表格 (26 列，按日期倒序)
    pub fn export_spreadsheet(&self, writer: impl Write) -> Result<(), JournalError> {
        spreadsheet::export(writer, &self.state.daily_work_data)
    }

    // =====================================================================
    // 内部
    // =====================================================================

    /// 变更后的统一落盘口子：失败告警，不打断业务
    fn persist(&self) {
        if let Err(err) = self.persister.save(&self.state) {
            warn!(%err, "快照落盘失败，内存状态继续生效");
        }
    }
}
