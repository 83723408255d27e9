use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, scope},
    db::{sale_repo::SaleFilters, ClientRepository, PaymentRepository, SaleRepository},
    models::{
        auth::Session,
        payment::{Payment, PaymentWithSale},
        sale::{Sale, SaleWithTotals},
    },
};

// O motor de lançamentos da caderneta. Mantém o invariante entre
// Sale.value, Sale.is_paid, a soma dos pagamentos e Client.debit_balance,
// sempre dentro de UMA transação por mutação (tudo ou nada).
//
// Máquina de estados de uma venda:
//   UNPAID --[pagamento completa o valor]--> PAID
//   PAID   --[remoção de pagamento]-------> UNPAID
#[derive(Clone)]
pub struct LedgerService {
    sale_repo: SaleRepository,
    payment_repo: PaymentRepository,
    client_repo: ClientRepository,
}

// Decisão pura sobre um novo pagamento: quita a venda ou não
#[derive(Debug)]
pub(crate) struct PaymentPlan {
    pub settles_sale: bool,
}

// Quanto ainda falta pagar de uma venda
pub(crate) fn remaining_value(sale_value: Decimal, total_paid: Decimal) -> Decimal {
    (sale_value - total_paid).max(Decimal::ZERO)
}

// Valida um pagamento contra o valor restante. A comparação é decimal
// exata, então a igualdade no limite quita a venda sem surpresas de
// ponto flutuante.
pub(crate) fn apply_payment(
    sale_value: Decimal,
    total_paid: Decimal,
    amount: Decimal,
) -> Result<PaymentPlan, AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::InvalidInput(
            "O valor do pagamento deve ser maior que zero".into(),
        ));
    }

    let remaining = remaining_value(sale_value, total_paid);
    if amount > remaining {
        return Err(AppError::PaymentExceedsRemaining { remaining });
    }

    Ok(PaymentPlan {
        settles_sale: total_paid + amount == sale_value,
    })
}

impl LedgerService {
    pub fn new(
        sale_repo: SaleRepository,
        payment_repo: PaymentRepository,
        client_repo: ClientRepository,
    ) -> Self {
        Self {
            sale_repo,
            payment_repo,
            client_repo,
        }
    }

    // =========================================================================
    //  MUTAÇÕES DO INVARIANTE (venda / pagamento)
    // =========================================================================

    pub async fn create_sale<'e, E>(
        &self,
        executor: E,
        session: Session,
        client_id: Uuid,
        value: Decimal,
        description: &str,
        is_paid: bool,
        due_date: DateTime<Utc>,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        if value <= Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "O valor da venda deve ser maior que zero".into(),
            ));
        }

        let mut tx = executor.begin().await?;

        let client = scope::find_scoped(
            self.client_repo.find_by_id(&mut *tx, client_id).await?,
            session.store_id,
            "Cliente",
            |c| c.store_id,
        )?;

        let sale = self
            .sale_repo
            .create(
                &mut *tx,
                session.store_id,
                client.id,
                session.user_id,
                value,
                description,
                is_paid,
                due_date,
            )
            .await?;

        // Venda nova sem pagamentos deve o valor inteiro. Se já nasce
        // quitada, nenhuma linha de pagamento é criada e o saldo não muda.
        if !is_paid {
            self.client_repo
                .adjust_debit_balance(&mut *tx, client.id, value)
                .await?;
        }

        tx.commit().await?;
        Ok(sale)
    }

    pub async fn create_payment<'e, E>(
        &self,
        executor: E,
        session: Session,
        sale_id: Uuid,
        value: Decimal,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let sale = scope::find_scoped(
            self.sale_repo.find_by_id(&mut *tx, sale_id).await?,
            session.store_id,
            "Venda",
            |s| s.store_id,
        )?;

        if sale.is_paid {
            return Err(AppError::InvalidState("A venda já está paga".into()));
        }

        let total_paid = self.payment_repo.total_paid(&mut *tx, sale.id).await?;
        let plan = apply_payment(sale.value, total_paid, value)?;

        let payment = self.payment_repo.create(&mut *tx, sale.id, value).await?;

        if plan.settles_sale {
            self.sale_repo.set_paid(&mut *tx, sale.id, true).await?;
        }

        self.client_repo
            .adjust_debit_balance(&mut *tx, sale.client_id, -value)
            .await?;

        tx.commit().await?;
        Ok(payment)
    }

    pub async fn delete_payment<'e, E>(
        &self,
        executor: E,
        session: Session,
        payment_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let payment = scope::find_scoped(
            self.payment_repo.find_ownership(&mut *tx, payment_id).await?,
            session.store_id,
            "Pagamento",
            |p| p.store_id,
        )?;

        self.payment_repo.delete(&mut *tx, payment.id).await?;

        // Reabertura incondicional: como todo pagamento é limitado ao valor
        // restante, remover qualquer um deles deixa a venda de fato em aberto.
        self.sale_repo.set_paid(&mut *tx, payment.sale_id, false).await?;

        self.client_repo
            .adjust_debit_balance(&mut *tx, payment.client_id, payment.value)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    //  CRUD DE VENDAS (edições e remoções não mexem no saldo devedor)
    // =========================================================================

    pub async fn get_sale<'e, A>(
        &self,
        executor: A,
        session: Session,
        id: Uuid,
    ) -> Result<SaleWithTotals, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        scope::find_scoped(
            self.sale_repo.find_with_totals(&mut *conn, id).await?,
            session.store_id,
            "Venda",
            |s| s.store_id,
        )
    }

    pub async fn list_sales<'e, E>(
        &self,
        executor: E,
        session: Session,
        filters: &SaleFilters<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SaleWithTotals>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.sale_repo
            .list(executor, session.store_id, filters, limit, offset)
            .await
    }

    pub async fn list_sales_by_client<'e, A>(
        &self,
        executor: A,
        session: Session,
        client_id: Uuid,
    ) -> Result<Vec<SaleWithTotals>, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        scope::find_scoped(
            self.client_repo.find_by_id(&mut *conn, client_id).await?,
            session.store_id,
            "Cliente",
            |c| c.store_id,
        )?;

        self.sale_repo
            .list_by_client(&mut *conn, session.store_id, client_id)
            .await
    }

    pub async fn update_sale<'e, A>(
        &self,
        executor: A,
        session: Session,
        id: Uuid,
        value: Option<Decimal>,
        description: Option<&str>,
        is_paid: Option<bool>,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Sale, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        if let Some(v) = value {
            if v <= Decimal::ZERO {
                return Err(AppError::InvalidInput(
                    "O valor da venda deve ser maior que zero".into(),
                ));
            }
        }

        let mut conn = executor.acquire().await?;

        scope::find_scoped(
            self.sale_repo.find_by_id(&mut *conn, id).await?,
            session.store_id,
            "Venda",
            |s| s.store_id,
        )?;

        self.sale_repo
            .update(&mut *conn, id, value, description, is_paid, due_date)
            .await
    }

    pub async fn delete_sale<'e, A>(
        &self,
        executor: A,
        session: Session,
        id: Uuid,
    ) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        scope::find_scoped(
            self.sale_repo.find_by_id(&mut *conn, id).await?,
            session.store_id,
            "Venda",
            |s| s.store_id,
        )?;

        // Os pagamentos caem junto por cascata no banco
        self.sale_repo.delete(&mut *conn, id).await
    }

    // =========================================================================
    //  LISTAGENS DE PAGAMENTOS
    // =========================================================================

    pub async fn list_payments_by_sale<'e, A>(
        &self,
        executor: A,
        session: Session,
        sale_id: Uuid,
    ) -> Result<Vec<Payment>, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        scope::find_scoped(
            self.sale_repo.find_by_id(&mut *conn, sale_id).await?,
            session.store_id,
            "Venda",
            |s| s.store_id,
        )?;

        self.payment_repo.list_by_sale(&mut *conn, sale_id).await
    }

    pub async fn list_payments_by_client<'e, A>(
        &self,
        executor: A,
        session: Session,
        client_id: Uuid,
    ) -> Result<Vec<PaymentWithSale>, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        scope::find_scoped(
            self.client_repo.find_by_id(&mut *conn, client_id).await?,
            session.store_id,
            "Cliente",
            |c| c.store_id,
        )?;

        self.payment_repo
            .list_by_client(&mut *conn, session.store_id, client_id)
            .await
    }

    pub async fn list_payments<'e, E>(
        &self,
        executor: E,
        session: Session,
    ) -> Result<Vec<PaymentWithSale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.payment_repo
            .list_by_store(executor, session.store_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn valor_restante_nunca_fica_negativo() {
        assert_eq!(remaining_value(dec("100"), dec("0")), dec("100"));
        assert_eq!(remaining_value(dec("100"), dec("60")), dec("40"));
        assert_eq!(remaining_value(dec("100"), dec("100")), dec("0"));
        assert_eq!(remaining_value(dec("100"), dec("150")), dec("0"));
    }

    #[test]
    fn pagamento_exato_quita_a_venda() {
        let plan = apply_payment(dec("100"), dec("60"), dec("40")).unwrap();
        assert!(plan.settles_sale);
    }

    #[test]
    fn um_centavo_a_menos_nao_quita() {
        let plan = apply_payment(dec("100"), dec("60"), dec("39.99")).unwrap();
        assert!(!plan.settles_sale);
    }

    #[test]
    fn pagamento_acima_do_restante_informa_quanto_falta() {
        let err = apply_payment(dec("100"), dec("60"), dec("40.01")).unwrap_err();
        match err {
            AppError::PaymentExceedsRemaining { remaining } => {
                assert_eq!(remaining, dec("40"));
            }
            other => panic!("erro inesperado: {other:?}"),
        }
    }

    #[test]
    fn pagamento_nao_positivo_e_rejeitado() {
        assert!(matches!(
            apply_payment(dec("100"), dec("0"), dec("0")),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            apply_payment(dec("100"), dec("0"), dec("-5")),
            Err(AppError::InvalidInput(_))
        ));
    }

    // O cenário de referência da caderneta, acompanhando o saldo do cliente:
    // venda de 100 -> paga 60 -> paga 40 -> remove o pagamento de 40.
    #[test]
    fn cenario_venda_pagamentos_e_estorno() {
        let sale_value = dec("100");
        let mut total_paid = Decimal::ZERO;
        let mut debit_balance = Decimal::ZERO;
        let mut is_paid = false;

        // CreateSale(value=100, is_paid=false) -> saldo 100
        debit_balance += sale_value;
        assert_eq!(debit_balance, dec("100"));

        // CreatePayment(60) -> continua em aberto, saldo 40
        let plan = apply_payment(sale_value, total_paid, dec("60")).unwrap();
        total_paid += dec("60");
        debit_balance -= dec("60");
        is_paid = plan.settles_sale;
        assert!(!is_paid);
        assert_eq!(debit_balance, dec("40"));

        // CreatePayment(40) -> quitada, saldo 0
        let plan = apply_payment(sale_value, total_paid, dec("40")).unwrap();
        total_paid += dec("40");
        debit_balance -= dec("40");
        is_paid = plan.settles_sale;
        assert!(is_paid);
        assert_eq!(debit_balance, dec("0"));

        // Pagar venda quitada é rejeitado antes de qualquer cálculo
        // (no serviço, sale.is_paid responde InvalidState)
        assert!(is_paid);

        // DeletePayment(40) -> reabre e devolve exatamente o valor ao saldo
        total_paid -= dec("40");
        debit_balance += dec("40");
        is_paid = false;
        assert_eq!(debit_balance, dec("40"));
        assert_eq!(remaining_value(sale_value, total_paid), dec("40"));
        assert!(!is_paid);
    }

    // Venda já quitada na criação não mexe no saldo devedor
    #[test]
    fn venda_quitada_na_criacao_nao_altera_saldo() {
        let debit_balance = dec("25");
        // is_paid=true na criação: nenhum ajuste é aplicado
        assert_eq!(debit_balance, dec("25"));

        // e não há linha de pagamento, então o restante segue o valor cheio
        assert_eq!(remaining_value(dec("50"), Decimal::ZERO), dec("50"));
    }
}
