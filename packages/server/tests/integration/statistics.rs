use crate::common::{TestApp, routes};

mod totals {
    use super::*;

    #[tokio::test]
    async fn empty_system_reports_zeroes() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::STATISTICS).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["total_customers"].as_u64().unwrap(), 0);
        assert_eq!(res.body["per_region"].as_array().unwrap().len(), 10);
        assert_eq!(
            res.body["recent_communications"].as_array().unwrap().len(),
            0
        );
        assert_eq!(
            res.body["most_active_customers"].as_array().unwrap().len(),
            0
        );
    }

    #[tokio::test]
    async fn total_equals_sum_of_region_counts() {
        let app = TestApp::spawn().await;
        app.create_customer("Ramallah", "A").await;
        app.create_customer("Ramallah", "B").await;
        app.create_customer("Nablus", "C").await;
        app.create_customer("Hebron", "D").await;

        let res = app.get(routes::STATISTICS).await;
        let total = res.body["total_customers"].as_u64().unwrap();
        let sum: i64 = res.body["per_region"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["customer_count"].as_i64().unwrap())
            .sum();
        assert_eq!(total as i64, sum);
        assert_eq!(total, 4);
    }
}

mod leaderboards {
    use super::*;

    #[tokio::test]
    async fn recent_communications_are_newest_first_with_customer_context() {
        let app = TestApp::spawn().await;
        let id = app.create_customer("Jenin", "Chatty Co").await;
        app.add_communication(id, "first contact").await;
        app.add_communication(id, "second contact").await;

        let res = app.get(routes::STATISTICS).await;
        let recent = res.body["recent_communications"].as_array().unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0]["details"].as_str().unwrap(), "second contact");
        assert_eq!(recent[0]["company_name"].as_str().unwrap(), "Chatty Co");
        assert_eq!(recent[0]["region"].as_str().unwrap(), "Jenin");
    }

    #[tokio::test]
    async fn recent_communications_cap_at_ten() {
        let app = TestApp::spawn().await;
        let id = app.create_customer("Tubas", "Relentless Co").await;
        for i in 0..12 {
            app.add_communication(id, &format!("call {i}")).await;
        }

        let res = app.get(routes::STATISTICS).await;
        let recent = res.body["recent_communications"].as_array().unwrap();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0]["details"].as_str().unwrap(), "call 11");
    }

    #[tokio::test]
    async fn most_active_ranks_by_communication_count() {
        let app = TestApp::spawn().await;
        let quiet = app.create_customer("Salfit", "Quiet Co").await;
        let busy = app.create_customer("Salfit", "Busy Co").await;
        app.add_communication(busy, "one").await;
        app.add_communication(busy, "two").await;
        app.add_communication(quiet, "only").await;

        let res = app.get(routes::STATISTICS).await;
        let active = res.body["most_active_customers"].as_array().unwrap();
        assert_eq!(active[0]["company_name"].as_str().unwrap(), "Busy Co");
        assert_eq!(active[0]["communication_count"].as_i64().unwrap(), 2);
        assert_eq!(active[1]["company_name"].as_str().unwrap(), "Quiet Co");
    }

    #[tokio::test]
    async fn customers_without_logs_still_rank_with_zero() {
        let app = TestApp::spawn().await;
        app.create_customer("Jericho", "Silent Partner").await;

        let res = app.get(routes::STATISTICS).await;
        let active = res.body["most_active_customers"].as_array().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0]["communication_count"].as_i64().unwrap(), 0);
    }
}
