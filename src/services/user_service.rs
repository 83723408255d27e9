use bcrypt::hash;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{StoreRepository, UserRepository},
    middleware::rbac,
    models::{
        auth::{Session, StoreRole},
        store::MemberWithUser,
    },
};

// Gestão da equipe da loja: usuários e seus vínculos/papéis.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    store_repo: StoreRepository,
}

impl UserService {
    pub fn new(user_repo: UserRepository, store_repo: StoreRepository) -> Self {
        Self {
            user_repo,
            store_repo,
        }
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        session: Session,
    ) -> Result<Vec<MemberWithUser>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.store_repo.list_members(executor, session.store_id).await
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        session: Session,
        name: &str,
        email: &str,
        password: &str,
        role: StoreRole,
    ) -> Result<MemberWithUser, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // Pela equipe só entram MANAGER e EMPLOYEE; OWNER nasce com a loja
        if role == StoreRole::Owner {
            return Err(AppError::InvalidInput(
                "O papel de um novo usuário deve ser MANAGER ou EMPLOYEE".into(),
            ));
        }
        rbac::ensure_manager_scope(session.role, role)?;

        let password_clone = password.to_owned();
        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let mut tx = executor.begin().await?;

        let user = self
            .user_repo
            .create_user(&mut *tx, name, email, &password_hash)
            .await?;

        self.store_repo
            .add_member(&mut *tx, user.id, session.store_id, role)
            .await?;

        tx.commit().await?;

        Ok(MemberWithUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role,
        })
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        session: Session,
        target_user_id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
        new_role: Option<StoreRole>,
    ) -> Result<MemberWithUser, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let current_role = self
            .store_repo
            .find_member_role(&mut *tx, target_user_id, session.store_id)
            .await?
            .ok_or(AppError::NotFound("Usuário"))?;

        // MANAGER só mexe em EMPLOYEE, e não pode promover ninguém
        rbac::ensure_manager_scope(session.role, current_role)?;
        if let Some(role) = new_role {
            if role == StoreRole::Owner {
                return Err(AppError::InvalidInput(
                    "Não é possível promover um usuário a OWNER".into(),
                ));
            }
            rbac::ensure_manager_scope(session.role, role)?;
        }

        let password_hash = match password {
            Some(p) => {
                let p = p.to_owned();
                Some(
                    tokio::task::spawn_blocking(move || hash(&p, bcrypt::DEFAULT_COST))
                        .await
                        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??,
                )
            }
            None => None,
        };

        let user = self
            .user_repo
            .update_user(&mut *tx, target_user_id, name, email, password_hash.as_deref())
            .await?;

        if let Some(role) = new_role {
            self.store_repo
                .update_member_role(&mut *tx, target_user_id, session.store_id, role)
                .await?;
        }

        tx.commit().await?;

        Ok(MemberWithUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: new_role.unwrap_or(current_role),
        })
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        session: Session,
        target_user_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let target_role = self
            .store_repo
            .find_member_role(&mut *tx, target_user_id, session.store_id)
            .await?
            .ok_or(AppError::NotFound("Usuário"))?;

        rbac::ensure_manager_scope(session.role, target_role)?;

        // A loja não pode ficar sem dono
        if target_role == StoreRole::Owner {
            let owners = self.store_repo.count_owners(&mut *tx, session.store_id).await?;
            if owners <= 1 {
                return Err(AppError::InvalidState(
                    "Não é possível remover o último dono da loja".into(),
                ));
            }
        }

        self.store_repo
            .delete_member(&mut *tx, target_user_id, session.store_id)
            .await?;

        // Usuário sem nenhum vínculo restante é removido de vez
        let remaining = self
            .store_repo
            .count_user_memberships(&mut *tx, target_user_id)
            .await?;

        if remaining == 0 {
            self.user_repo.delete_user(&mut *tx, target_user_id).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
