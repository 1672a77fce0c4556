//! src/commands/pay.rs

use crate::config;
use crate::format::price;
use crate::payment::{MockWeChatPay, OrderRequest, PaymentGateway, SubscriptionPlan};
use anyhow::{Context, Result};
use colored::Colorize;

pub async fn handle_pay(plan: SubscriptionPlan) -> Result<()> {
    let config = config::load_config().await?;
    let gateway = MockWeChatPay::new(config.payment);

    let order = gateway
        .create_order(&OrderRequest::for_plan(plan))
        .await
        .context("创建支付订单失败。")?;

    println!(
        "{} {} ({})",
        "💳 订阅套餐:".green(),
        plan.description().bold(),
        price(plan.price())
    );
    println!("订单号: {}", order.out_trade_no.cyan());
    println!("请使用微信扫描二维码完成支付:");
    println!("{}", order.code_url.underline());
    Ok(())
}

pub async fn handle_notify(body: String) -> Result<()> {
    let config = config::load_config().await?;
    let ack = MockWeChatPay::new(config.payment).handle_notify(&body);
    println!("{}", serde_json::to_string(&ack)?);
    Ok(())
}
