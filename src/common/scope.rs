use uuid::Uuid;

use crate::common::error::AppError;

// Checagem de posse: o recurso existe E pertence à loja da sessão.
// Recurso de outra loja responde NotFound, nunca Forbidden, para não
// vazar a existência de dados de terceiros.
pub fn find_scoped<T>(
    found: Option<T>,
    session_store_id: Uuid,
    resource: &'static str,
    store_of: impl Fn(&T) -> Uuid,
) -> Result<T, AppError> {
    found
        .filter(|r| store_of(r) == session_store_id)
        .ok_or(AppError::NotFound(resource))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[derive(Debug)]
    struct Recurso {
        store_id: Uuid,
    }

    #[test]
    fn recurso_da_propria_loja_e_devolvido() {
        let loja = Uuid::new_v4();
        let ok = find_scoped(Some(Recurso { store_id: loja }), loja, "Venda", |r| {
            r.store_id
        });
        assert!(ok.is_ok());
    }

    #[test]
    fn recurso_de_outra_loja_vira_not_found_e_nunca_forbidden() {
        let minha_loja = Uuid::new_v4();
        let outra_loja = Uuid::new_v4();

        let err = find_scoped(
            Some(Recurso {
                store_id: outra_loja,
            }),
            minha_loja,
            "Venda",
            |r| r.store_id,
        )
        .unwrap_err();

        // A resposta é indistinguível de um recurso inexistente
        assert!(matches!(err, AppError::NotFound("Venda")));
        assert!(!matches!(err, AppError::Forbidden(_)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn recurso_inexistente_tambem_vira_not_found() {
        let err = find_scoped(None::<Recurso>, Uuid::new_v4(), "Cliente", |r| r.store_id)
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound("Cliente")));
    }
}
