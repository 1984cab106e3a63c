use serde_json::json;

use crate::common::{TestApp, routes};

mod add_communication {
    use super::*;

    #[tokio::test]
    async fn recorded_communication_appears_first() {
        let app = TestApp::spawn().await;
        let id = app.create_customer("Ramallah", "Talkative Co").await;

        let first = app.add_communication(id, "Called, no answer").await;
        assert_eq!(first.status, 201, "{}", first.text);
        assert_eq!(first.body["details"].as_str().unwrap(), "Called, no answer");

        let second = app.add_communication(id, "Reached the manager").await;
        assert_eq!(second.status, 201);

        let logs = app.get(&routes::communications(id)).await;
        let logs = logs.body.as_array().unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0]["details"].as_str().unwrap(), "Reached the manager");
        assert_eq!(logs[1]["details"].as_str().unwrap(), "Called, no answer");
    }

    #[tokio::test]
    async fn bumps_the_parent_last_updated_at() {
        let app = TestApp::spawn().await;
        let id = app.create_customer("Nablus", "Busy Co").await;

        let before = app.get(&routes::customer(id)).await;
        let before_updated = before.body["last_updated_at"].as_str().unwrap().to_string();

        let res = app.add_communication(id, "Quarterly check-in").await;
        assert_eq!(res.status, 201);

        let after = app.get(&routes::customer(id)).await;
        let after_updated = after.body["last_updated_at"].as_str().unwrap();
        assert!(after_updated >= before_updated.as_str());
        // The bump matches the log timestamp exactly.
        assert_eq!(after_updated, res.body["logged_at"].as_str().unwrap());
    }

    #[tokio::test]
    async fn unknown_customer_is_not_found_and_touches_nothing() {
        let app = TestApp::spawn().await;
        let bystander = app.create_customer("Jenin", "Bystander Co").await;
        let before = app.get(&routes::customer(bystander)).await;

        let res = app.add_communication(9999, "Into the void").await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"].as_str().unwrap(), "NOT_FOUND");

        let after = app.get(&routes::customer(bystander)).await;
        assert_eq!(
            after.body["last_updated_at"].as_str().unwrap(),
            before.body["last_updated_at"].as_str().unwrap()
        );
    }

    #[tokio::test]
    async fn blank_details_are_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_customer("Hebron", "Quiet Co").await;

        for details in ["", "   "] {
            let res = app
                .post(&routes::communications(id), &json!({ "details": details }))
                .await;
            assert_eq!(res.status, 400);
            assert_eq!(res.body["code"].as_str().unwrap(), "VALIDATION_ERROR");
        }

        let logs = app.get(&routes::communications(id)).await;
        assert_eq!(logs.body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn details_are_trimmed() {
        let app = TestApp::spawn().await;
        let id = app.create_customer("Salfit", "Tidy Co").await;

        let res = app.add_communication(id, "  padded details  ").await;
        assert_eq!(res.status, 201);
        assert_eq!(res.body["details"].as_str().unwrap(), "padded details");
    }
}

mod list_communications {
    use super::*;

    #[tokio::test]
    async fn unknown_customer_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::communications(123)).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn empty_history_is_an_empty_list() {
        let app = TestApp::spawn().await;
        let id = app.create_customer("Tubas", "Silent Co").await;

        let res = app.get(&routes::communications(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 0);
    }
}

mod example_scenario {
    use super::*;

    // The end-to-end walkthrough: create without an initial communication,
    // then record one and watch the region listing update.
    #[tokio::test]
    async fn acme_walkthrough() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                &routes::customers("Ramallah"),
                &json!({ "company_name": "Acme" }),
            )
            .await;
        assert_eq!(res.status, 201);
        let id = res.body["id"].as_i64().unwrap() as i32;

        let list = app.get(&routes::customers("Ramallah")).await;
        let rows = list.body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["communication_count"].as_i64().unwrap(), 0);

        let res = app.add_communication(id, "Called, no answer").await;
        assert_eq!(res.status, 201);

        let logs = app.get(&routes::communications(id)).await;
        let logs = logs.body.as_array().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0]["details"].as_str().unwrap(), "Called, no answer");

        let list = app.get(&routes::customers("Ramallah")).await;
        let rows = list.body.as_array().unwrap();
        assert_eq!(rows[0]["communication_count"].as_i64().unwrap(), 1);
    }
}
