//! Service wiring: one record store shared by every resource service.

use std::sync::Arc;

use travelhub_auth::{Hs256Jwt, JwtValidator};
use travelhub_core::resources::CRUD_RESOURCES;
use travelhub_infra::{
    AuthService, ChartsService, CrudService, InMemoryStore, PostgresStore, RecordStore, ResourceService,
    UserService, db,
};

use crate::config::AppConfig;

pub struct AppServices {
    /// Generic CRUD services, one per table-backed resource (users excluded).
    pub resources: Vec<Arc<dyn ResourceService>>,
    pub users: Arc<UserService>,
    pub auth: AuthService,
    pub charts: ChartsService,
    pub jwt: Arc<dyn JwtValidator>,
}

pub fn build_services(config: &AppConfig) -> AppServices {
    let store: Arc<dyn RecordStore> = if config.use_persistent_stores {
        tracing::info!(
            host = %config.database.host,
            database = %config.database.database,
            "using postgres record store"
        );
        Arc::new(PostgresStore::new(db::connect_lazy(&config.database)))
    } else {
        tracing::info!("using in-memory record store");
        Arc::new(InMemoryStore::new())
    };

    build_with_store(store, Hs256Jwt::new(&config.jwt))
}

pub fn build_with_store(store: Arc<dyn RecordStore>, jwt: Hs256Jwt) -> AppServices {
    let resources = CRUD_RESOURCES
        .iter()
        .copied()
        .map(|spec| Arc::new(CrudService::new(spec, store.clone())) as Arc<dyn ResourceService>)
        .collect();

    let users = UserService::new(store.clone());

    AppServices {
        resources,
        auth: AuthService::new(users.clone(), jwt.clone()),
        users: Arc::new(users),
        charts: ChartsService::new(store),
        jwt: Arc::new(jwt),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};
    use travelhub_auth::JwtConfig;
    use travelhub_core::{ColumnKind, ResourceSpec};

    use super::*;
    use crate::app::dto::{self, Mode};

    fn services() -> AppServices {
        let jwt = Hs256Jwt::new(&JwtConfig {
            secret: "test-secret".into(),
            ttl_secs: 3600,
        });
        build_with_store(Arc::new(InMemoryStore::new()), jwt)
    }

    /// A body carrying every writable column of the resource.
    fn full_body(spec: &ResourceSpec) -> Value {
        let mut body = Map::new();
        for column in spec.columns.iter().filter(|c| c.writable) {
            let value = match column.kind {
                ColumnKind::Text => json!(format!("{}-{}", column.field, spec.table)),
                ColumnKind::Integer => json!(1),
                ColumnKind::Float => json!(2.5),
                ColumnKind::Boolean => json!(true),
                ColumnKind::OneOf(allowed) => json!(allowed[0]),
            };
            body.insert(column.field.to_string(), value);
        }
        Value::Object(body)
    }

    #[tokio::test]
    async fn every_writable_field_survives_create_and_read() {
        let services = services();
        let mut targets: Vec<Arc<dyn ResourceService>> = services.resources.clone();
        targets.push(services.users.clone());

        // Products precede orders, so productId 1 exists by the time orders are created.
        for service in targets {
            let spec = service.spec();
            let body = full_body(spec);
            let input = dto::parse_fields(spec, &body, Mode::Create)
                .unwrap_or_else(|e| panic!("{}: {}", spec.table, e.messages()));
            let created = service
                .create(input)
                .await
                .unwrap_or_else(|e| panic!("{}: {}", spec.table, e.messages()));

            let stored = service.find_one(created.id).await.unwrap().expect("row was stored");
            let json = stored.to_json(spec);
            assert_eq!(json[spec.id_field], json!(created.id), "{}", spec.table);

            for column in spec.columns.iter().filter(|c| c.writable && !c.write_only) {
                assert_eq!(
                    json[column.field], body[column.field],
                    "{}.{} did not round-trip",
                    spec.table, column.field
                );
            }
        }
    }
}
