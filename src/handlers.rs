pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod payments;
pub mod sales;
pub mod store;
pub mod users;

// Normaliza a paginação da query: página mínima 1, tamanho 1..=100 e
// offset com aritmética saturada, para que uma página absurda não estoure.
pub(crate) fn page_window(page: Option<i64>, per_page: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    let offset = page.saturating_sub(1).saturating_mul(per_page);
    (per_page, offset)
}

#[cfg(test)]
mod tests {
    use super::page_window;

    #[test]
    fn paginacao_usa_padroes_sensatos() {
        assert_eq!(page_window(None, None), (20, 0));
        assert_eq!(page_window(Some(3), Some(50)), (50, 100));
        assert_eq!(page_window(Some(0), Some(0)), (1, 0));
        assert_eq!(page_window(Some(-2), Some(1000)), (100, 0));
    }

    #[test]
    fn pagina_gigante_nao_estoura_nem_fica_negativa() {
        let (per_page, offset) = page_window(Some(i64::MAX), Some(20));
        assert_eq!(per_page, 20);
        assert_eq!(offset, i64::MAX);

        let (_, offset) = page_window(Some(i64::MAX - 1), Some(100));
        assert!(offset >= 0);
    }
}
