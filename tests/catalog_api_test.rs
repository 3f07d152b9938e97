// ==========================================
// 票种目录API测试
// ==========================================
// 职责: 验证 CatalogApi 的增删改查与删除回退策略
// ==========================================


#[cfg(test)]
mod catalog_api_test {
    use chrono::{Local, NaiveDate};
    use mangrove_pos::api::{ApiError, CatalogApi};
    use mangrove_pos::domain::types::{DeleteOutcome, PaymentMethod};
    use mangrove_pos::domain::NewTransaction;

    use crate::test_helpers::setup_test_env;

    #[test]
    fn test_create_list_update_ticket_type() {
        let env = setup_test_env().unwrap();
        let api = CatalogApi::new(env.ticket_type_repo.clone());

        let dewasa = api.create_ticket_type("Tiket Dewasa", 15000).unwrap();
        let anak = api.create_ticket_type("Tiket Anak", 10000).unwrap();

        let all = api.list_ticket_types(false).unwrap();
        assert_eq!(all.len(), 2);
        // id 升序
        assert_eq!(all[0].id, dewasa.id);
        assert_eq!(all[1].id, anak.id);

        let updated = api.update_ticket_type(anak.id, "Tiket Anak", 12000).unwrap();
        assert_eq!(updated.price, 12000);
    }

    #[test]
    fn test_create_ticket_type_输入校验() {
        let env = setup_test_env().unwrap();
        let api = CatalogApi::new(env.ticket_type_repo.clone());

        // 名称空白
        assert!(matches!(
            api.create_ticket_type("   ", 1000),
            Err(ApiError::InvalidInput(_))
        ));

        // 单价为负
        assert!(matches!(
            api.create_ticket_type("Tiket Dewasa", -1),
            Err(ApiError::InvalidInput(_))
        ));

        // 名称前后空白被裁剪
        let ticket = api.create_ticket_type("  Tiket Dewasa  ", 15000).unwrap();
        assert_eq!(ticket.name, "Tiket Dewasa");
    }

    #[test]
    fn test_set_active_影响收银端目录() {
        let env = setup_test_env().unwrap();
        let api = CatalogApi::new(env.ticket_type_repo.clone());

        let dewasa = api.create_ticket_type("Tiket Dewasa", 15000).unwrap();
        api.create_ticket_type("Tiket Anak", 10000).unwrap();

        api.set_ticket_type_active(dewasa.id, false).unwrap();

        let active = api.list_ticket_types(true).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Tiket Anak");

        // 重新上架
        api.set_ticket_type_active(dewasa.id, true).unwrap();
        assert_eq!(api.list_ticket_types(true).unwrap().len(), 2);
    }

    // ==========================================
    // 删除回退策略
    // ==========================================

    #[test]
    fn test_delete_无引用时物理删除() {
        let env = setup_test_env().unwrap();
        let api = CatalogApi::new(env.ticket_type_repo.clone());

        let dewasa = api.create_ticket_type("Tiket Dewasa", 15000).unwrap();
        let outcome = api.delete_ticket_type(dewasa.id).unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);

        assert!(matches!(
            api.get_ticket_type(dewasa.id),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_有交易引用时回退为停用() {
        let env = setup_test_env().unwrap();
        let api = CatalogApi::new(env.ticket_type_repo.clone());

        let dewasa = api.create_ticket_type("Tiket Dewasa", 15000).unwrap();
        env.transaction_repo
            .insert_batch(&[NewTransaction {
                batch_id: "batch-1".to_string(),
                buyer_name: "Budi".to_string(),
                group_name: "-".to_string(),
                ticket_type_id: dewasa.id,
                quantity: 1,
                line_total: 15000,
                payment_method: PaymentMethod::Tunai,
                visit_date: NaiveDate::from_ymd_opt(2026, 8, 23).unwrap(),
                created_at: Local::now().naive_local(),
            }])
            .unwrap();

        let outcome = api.delete_ticket_type(dewasa.id).unwrap();
        assert_eq!(outcome, DeleteOutcome::Deactivated);

        // 票种行保留但已停用，历史 JOIN 继续可用
        let ticket = api.get_ticket_type(dewasa.id).unwrap();
        assert!(!ticket.active);
        assert_eq!(
            env.transaction_repo.count_by_ticket_type(dewasa.id).unwrap(),
            1
        );
    }

    #[test]
    fn test_delete_不存在的票种返回NotFound() {
        let env = setup_test_env().unwrap();
        let api = CatalogApi::new(env.ticket_type_repo.clone());

        assert!(matches!(
            api.delete_ticket_type(999),
            Err(ApiError::NotFound(_))
        ));
    }
}
