// ==========================================
// 并发结账控制测试
// ==========================================
// 职责: 验证结账防重状态机在真实并发下的行为
// 近乎同时的多次提交至多产生一个交易批次
// ==========================================


#[cfg(test)]
mod concurrent_checkout_test {
    use mangrove_pos::api::{CashierApi, CatalogApi};
    use mangrove_pos::domain::types::{CheckoutPhase, PaymentMethod};
    use std::sync::{Arc, Barrier};
    use std::thread;

    use crate::test_helpers::setup_test_env;

    #[test]
    fn test_并发提交_恰好一个批次落库() {
        let env = setup_test_env().unwrap();

        let catalog_api = CatalogApi::new(env.ticket_type_repo.clone());
        let dewasa = catalog_api.create_ticket_type("Tiket Dewasa", 15000).unwrap();

        let cashier_api = Arc::new(CashierApi::new(
            env.ticket_type_repo.clone(),
            env.transaction_repo.clone(),
            env.config_manager.clone(),
        ));
        cashier_api.add_to_cart(dewasa.id).unwrap();
        cashier_api.add_to_cart(dewasa.id).unwrap();

        // 8 个线程同时提交同一购物车 (模拟回车连发)
        let thread_count = 8;
        let barrier = Arc::new(Barrier::new(thread_count));
        let mut handles = Vec::new();
        for _ in 0..thread_count {
            let api = cashier_api.clone();
            let barrier = barrier.clone();
            handles.push(thread::spawn(move || {
                barrier.wait();
                api.checkout("Budi", None, 30000, PaymentMethod::Tunai)
            }));
        }

        let mut accepted = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.join().unwrap() {
                Ok(response) if response.accepted => {
                    accepted += 1;
                    assert_eq!(response.total_due, 30000);
                    assert_eq!(response.change_due, 0);
                }
                Ok(_) => rejected += 1,
                Err(e) => panic!("并发提交不应产生错误: {}", e),
            }
        }

        // 恰好一次被接受，其余全部静默拒绝
        assert_eq!(accepted, 1);
        assert_eq!(rejected, thread_count - 1);

        // 数据库中恰好一个批次 (一条交易行)
        let rows = env.transaction_repo.list(None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, 2);
        assert_eq!(rows[0].line_total, 30000);

        // 状态机保持锁定，等待收银员确认
        assert_eq!(cashier_api.checkout_phase(), CheckoutPhase::Completed);
    }

    #[test]
    fn test_串行多单_每单恰好一个批次() {
        let env = setup_test_env().unwrap();

        let catalog_api = CatalogApi::new(env.ticket_type_repo.clone());
        let dewasa = catalog_api.create_ticket_type("Tiket Dewasa", 15000).unwrap();

        let cashier_api = CashierApi::new(
            env.ticket_type_repo.clone(),
            env.transaction_repo.clone(),
            env.config_manager.clone(),
        );

        let mut batch_ids = Vec::new();
        for i in 0..3 {
            cashier_api.add_to_cart(dewasa.id).unwrap();
            let response = cashier_api
                .checkout(&format!("Pembeli {}", i), None, 15000, PaymentMethod::Tunai)
                .unwrap();
            assert!(response.accepted);
            batch_ids.push(response.batch_id.unwrap());
            cashier_api.acknowledge().unwrap();
        }

        // 三单三个互不相同的批次号
        batch_ids.sort();
        batch_ids.dedup();
        assert_eq!(batch_ids.len(), 3);
        assert_eq!(env.transaction_repo.list(None).unwrap().len(), 3);
    }
}
