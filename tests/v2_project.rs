/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers;
    use rex::v2::{
        GeoPosition, Project, ProjectAddress, ProjectTransformation, RexError, Rotation,
    };
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_project_create(server: &MockServer, status: u16) {
        Mock::given(method("POST"))
            .and(path("/api/v2/projects"))
            .and(header("authorization", helpers::BEARER))
            .and(body_partial_json(json!({"name": "Office", "owner": "u-1"})))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "name": "Office",
                "owner": "u-1",
                "_links": {
                    "self": {"href": helpers::link(server, "/api/v2/projects/1020")},
                    "project": {"href": helpers::link(server, "/api/v2/projects/1020{?projection}"), "templated": true}
                }
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn list_projects_fills_in_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/projects/search/findAllByOwner"))
            .and(query_param("owner", "u-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_embedded": {"projects": [
                    {"name": "Office", "owner": "u-1",
                     "_links": {"self": {"href": "https://rex.robotic-eyes.com/api/v2/projects/1020"}}},
                    {"name": "Odd", "owner": "u-1",
                     "_links": {"self": {"href": "https://rex.robotic-eyes.com/api/v2/elsewhere"}}}
                ]},
                "_links": {"self": {"href": "https://rex.robotic-eyes.com/api/v2/projects/search/findAllByOwner?owner=u-1"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = helpers::mock_client(&server);
        let projects = Project::list_by_owner(&client, "u-1").await.unwrap();

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].id, "1020");
        assert_eq!(projects[0].name, "Office");
        assert_eq!(projects[1].id, "");
        assert!(projects[0].to_string().contains("1020"));
    }

    #[tokio::test]
    async fn list_projects_of_owner_without_projects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/projects/search/findAllByOwner"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_links": {}})))
            .mount(&server)
            .await;

        let client = helpers::mock_client(&server);
        assert!(Project::list_by_owner(&client, "u-2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_project_with_files_and_references() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/projects/1020"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Office",
                "owner": "u-1",
                "type": "rex",
                "_embedded": {
                    "rootRexReference": {
                        "rootReference": true,
                        "key": "root-key",
                        "address": {"addressLine1": "Hauptplatz 1", "city": "Graz"},
                        "_links": {"self": {"href": helpers::link(&server, "/api/v2/rexReferences/1")}}
                    },
                    "projectFiles": [{"name": "model.rex", "fileSize": 1024}],
                    "rexReferences": [{"rootReference": false, "key": "file-key"}]
                },
                "_links": {"self": {"href": helpers::link(&server, "/api/v2/projects/1020")}}
            })))
            .mount(&server)
            .await;

        let client = helpers::mock_client(&server);
        let project = Project::from_id(&client, "1020").await.unwrap();

        assert_eq!(project.id, "1020");
        assert_eq!(project.project_type.as_deref(), Some("rex"));
        assert_eq!(project.embedded.project_files[0].name, "model.rex");
        assert_eq!(project.embedded.rex_references.len(), 1);
        let root = project.root_reference().unwrap();
        assert_eq!(root.address.as_ref().unwrap().city, "Graz");
    }

    #[tokio::test]
    async fn get_missing_project_fails_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/projects/9"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = helpers::mock_client(&server);
        let err = Project::from_id(&client, "9").await.unwrap_err();
        assert!(matches!(err, RexError::ApiResponse(404, _)), "{err:?}");
    }

    #[tokio::test]
    async fn create_project_adds_root_reference() {
        let server = MockServer::start().await;
        mount_project_create(&server, 201).await;
        Mock::given(method("POST"))
            .and(path("/api/v2/rexReferences"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "rootReference": true,
                "key": "root-key",
                "_links": {"self": {"href": helpers::link(&server, "/api/v2/rexReferences/1")}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let address = ProjectAddress {
            address_line1: "Hauptplatz 1".to_string(),
            city: "Graz".to_string(),
            ..Default::default()
        };
        let transformation = ProjectTransformation {
            rotation: Rotation { x: 0.0, y: 0.0, z: 45.0 },
            position: GeoPosition::point(vec![15.43, 47.07]),
        };

        let client = helpers::mock_client(&server);
        let created = Project::create(
            &client,
            "u-1",
            "Office",
            Some(&address),
            Some(&transformation),
        )
        .await
        .unwrap();
        assert_eq!(created.id, "1020");

        let references = helpers::json_bodies(&server, "/api/v2/rexReferences").await;
        assert_eq!(references.len(), 1);
        let reference = &references[0];
        assert_eq!(reference["rootReference"], true);
        assert!(reference.get("parentReference").is_none());
        assert_eq!(
            reference["project"],
            helpers::link(&server, "/api/v2/projects/1020").as_str()
        );
        assert_eq!(reference["address"]["city"], "Graz");
        assert_eq!(reference["absoluteTransformation"]["rotation"]["z"], 45.0);
        assert!(!reference["key"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_project_reports_failing_reference() {
        let server = MockServer::start().await;
        mount_project_create(&server, 201).await;
        Mock::given(method("POST"))
            .and(path("/api/v2/rexReferences"))
            .respond_with(ResponseTemplate::new(500).set_body_string("reference store down"))
            .expect(1)
            .mount(&server)
            .await;

        let client = helpers::mock_client(&server);
        let err = Project::create(&client, "u-1", "Office", None, None)
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("500"), "{msg}");
        assert!(msg.contains("reference store down"), "{msg}");
    }

    #[tokio::test]
    async fn create_project_stops_when_project_is_rejected() {
        let server = MockServer::start().await;
        mount_project_create(&server, 400).await;
        Mock::given(method("POST"))
            .and(path("/api/v2/rexReferences"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = helpers::mock_client(&server);
        let err = Project::create(&client, "u-1", "Office", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RexError::ApiResponse(400, _)), "{err:?}");
    }
}
