//! src/payment.rs
//!
//! 微信支付下单与回调。当前实现是模拟网关：不生成真实签名、不请求微信接口、
//! 不保存订单，只返回前端展示二维码所需的字段。回调只做非空检查，不校验签名。

use crate::config::PaymentConfig;
use crate::errors::PaymentError;
use async_trait::async_trait;
use chrono::Utc;
use clap::ValueEnum;
use serde::Serialize;
use uuid::Uuid;

/// 订阅套餐
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Monthly,
    Quarterly,
    Yearly,
}

impl SubscriptionPlan {
    /// 售价，单位元
    pub fn price(&self) -> f64 {
        match self {
            SubscriptionPlan::Monthly => 199.0,
            SubscriptionPlan::Quarterly => 499.0,
            SubscriptionPlan::Yearly => 1999.0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SubscriptionPlan::Monthly => "月度版",
            SubscriptionPlan::Quarterly => "季度版",
            SubscriptionPlan::Yearly => "年度版",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SubscriptionPlan::Monthly => "monthly",
            SubscriptionPlan::Quarterly => "quarterly",
            SubscriptionPlan::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub plan_type: String,
    /// 金额，单位元
    pub amount: f64,
    pub description: String,
    pub client_ip: Option<String>,
}

impl OrderRequest {
    pub fn for_plan(plan: SubscriptionPlan) -> Self {
        Self {
            plan_type: plan.key().to_string(),
            amount: plan.price(),
            description: plan.description().to_string(),
            client_ip: None,
        }
    }
}

/// 统一下单参数
#[derive(Debug, Clone, Serialize)]
pub struct UnifiedOrderParams {
    pub appid: String,
    pub mch_id: String,
    pub nonce_str: String,
    pub body: String,
    pub out_trade_no: String,
    /// 金额，单位分
    pub total_fee: u64,
    pub spbill_create_ip: String,
    pub notify_url: String,
    pub trade_type: String,
}

/// 返回给前端的预支付信息
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepayOrder {
    pub app_id: String,
    pub time_stamp: String,
    pub nonce_str: String,
    pub package: String,
    pub sign_type: String,
    pub pay_sign: String,
    #[serde(rename = "code_url")]
    pub code_url: String,
    #[serde(rename = "out_trade_no")]
    pub out_trade_no: String,
}

/// 回复微信支付服务器的应答
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyAck {
    pub return_code: String,
    pub return_msg: String,
}

impl NotifyAck {
    pub fn success() -> Self {
        Self {
            return_code: "SUCCESS".to_string(),
            return_msg: "OK".to_string(),
        }
    }

    pub fn fail(msg: &str) -> Self {
        Self {
            return_code: "FAIL".to_string(),
            return_msg: msg.to_string(),
        }
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(&self, request: &OrderRequest) -> Result<PrepayOrder, PaymentError>;
    fn handle_notify(&self, body: &str) -> NotifyAck;
}

pub struct MockWeChatPay {
    config: PaymentConfig,
}

impl MockWeChatPay {
    pub fn new(config: PaymentConfig) -> Self {
        Self { config }
    }

    pub fn unified_order_params(
        &self,
        request: &OrderRequest,
    ) -> Result<UnifiedOrderParams, PaymentError> {
        if request.plan_type.trim().is_empty() {
            return Err(PaymentError::MissingParams("planType"));
        }
        if request.description.trim().is_empty() {
            return Err(PaymentError::MissingParams("description"));
        }
        if !(request.amount.is_finite() && request.amount > 0.0) {
            return Err(PaymentError::InvalidAmount);
        }

        Ok(UnifiedOrderParams {
            appid: self.config.appid.clone(),
            mch_id: self.config.mch_id.clone(),
            nonce_str: random_token(15),
            body: request.description.clone(),
            out_trade_no: format!("ORDER_{}_{}", Utc::now().timestamp_millis(), random_token(9)),
            total_fee: (request.amount * 100.0).round() as u64,
            spbill_create_ip: request
                .client_ip
                .clone()
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            notify_url: self.config.notify_url.clone(),
            trade_type: "NATIVE".to_string(),
        })
    }
}

#[async_trait]
impl PaymentGateway for MockWeChatPay {
    async fn create_order(&self, request: &OrderRequest) -> Result<PrepayOrder, PaymentError> {
        let params = self.unified_order_params(request)?;
        log::info!("微信支付请求参数: {params:?}");

        Ok(PrepayOrder {
            app_id: params.appid,
            time_stamp: Utc::now().timestamp().to_string(),
            nonce_str: params.nonce_str,
            package: format!("prepay_id=wx{}", random_token(15)),
            sign_type: "MD5".to_string(),
            pay_sign: format!("mock_signature_{}", random_token(15)),
            code_url: format!(
                "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=weixin://wxpay/bizpayurl?pr={}",
                random_token(15)
            ),
            out_trade_no: params.out_trade_no,
        })
    }

    fn handle_notify(&self, body: &str) -> NotifyAck {
        if body.trim().is_empty() {
            log::warn!("微信支付回调内容为空");
            return NotifyAck::fail("处理失败");
        }
        log::info!("微信支付回调: {body}");
        NotifyAck::success()
    }
}

fn random_token(len: usize) -> String {
    Uuid::new_v4().simple().to_string().chars().take(len).collect()
}
