use crate::{common::error::AppError, models::auth::StoreRole};

// Política de autorização: função pura (papel, ação) -> permitido/negado.
// A checagem de posse (recurso pertence à loja da sessão) é feita à parte,
// nos serviços, e responde NotFound (nunca Forbidden).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateClient,
    UpdateClient,
    UpdateClientObservations,
    DeleteClient,
    CreateSale,
    UpdateSale,
    DeleteSale,
    CreatePayment,
    DeletePayment,
    ManageStore,
    ManageUsers,
}

pub fn is_allowed(role: StoreRole, action: Action) -> bool {
    use Action::*;
    use StoreRole::*;

    match action {
        // Qualquer membro da equipe
        CreateClient | UpdateClientObservations | CreateSale | CreatePayment => true,

        // EMPLOYEE também pode editar a ficha completa do cliente
        UpdateClient => true,

        // Apenas OWNER e MANAGER
        DeleteClient | UpdateSale | DeleteSale | DeletePayment | ManageUsers => {
            matches!(role, Owner | Manager)
        }

        // Apenas OWNER
        ManageStore => role == Owner,
    }
}

pub fn authorize(role: StoreRole, action: Action) -> Result<(), AppError> {
    if is_allowed(role, action) {
        Ok(())
    } else {
        Err(AppError::Forbidden(match action {
            Action::ManageStore => "apenas o dono pode gerenciar a loja",
            Action::ManageUsers => "apenas dono e gerente podem gerenciar usuários",
            _ => "seu papel não permite esta ação",
        }))
    }
}

// Regra extra de escopo: um MANAGER só pode criar/alterar/remover EMPLOYEEs.
pub fn ensure_manager_scope(actor: StoreRole, target: StoreRole) -> Result<(), AppError> {
    if actor == StoreRole::Manager && target != StoreRole::Employee {
        return Err(AppError::Forbidden(
            "gerentes só podem gerenciar funcionários",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use StoreRole::*;

    const ALL_ROLES: [StoreRole; 3] = [Owner, Manager, Employee];

    // A matriz completa de capacidades, papel a papel
    #[test]
    fn matriz_de_permissoes_por_papel() {
        use Action::*;

        // (ação, OWNER, MANAGER, EMPLOYEE)
        let expectations = [
            (CreateClient, true, true, true),
            (UpdateClient, true, true, true),
            (UpdateClientObservations, true, true, true),
            (DeleteClient, true, true, false),
            (CreateSale, true, true, true),
            (UpdateSale, true, true, false),
            (DeleteSale, true, true, false),
            (CreatePayment, true, true, true),
            (DeletePayment, true, true, false),
            (ManageStore, true, false, false),
            (ManageUsers, true, true, false),
        ];

        for (action, owner, manager, employee) in expectations {
            assert_eq!(is_allowed(Owner, action), owner, "{action:?} para OWNER");
            assert_eq!(is_allowed(Manager, action), manager, "{action:?} para MANAGER");
            assert_eq!(is_allowed(Employee, action), employee, "{action:?} para EMPLOYEE");
        }
    }

    #[test]
    fn negacao_vira_forbidden() {
        let err = authorize(Employee, Action::DeleteSale).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = authorize(Manager, Action::ManageStore).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn gerente_so_alcanca_funcionarios() {
        assert!(ensure_manager_scope(Manager, Employee).is_ok());
        assert!(ensure_manager_scope(Manager, Manager).is_err());
        assert!(ensure_manager_scope(Manager, Owner).is_err());

        // OWNER não tem restrição de alvo
        for target in ALL_ROLES {
            assert!(ensure_manager_scope(Owner, target).is_ok());
        }
    }
}
