//! Integration tests for the full authorization pipeline.
//!
//! Tests: bearer token → CredentialVerifier → scope_request → AuthorizationGate
//!
//! Verifies:
//! - An admitted request carries the right principal and tenant scope
//! - Live account state (role change, deactivation) wins over token claims
//! - Cross-tenant writes die in scoping, and again in the gate

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, Utc};

    use fleetdesk_auth::{
        scope_request, AuthError, AuthorizationGate, CredentialVerifier, Hs256JwtValidator,
        JwtClaims, PermissionTable, Principal, RequestKind, Role,
    };
    use fleetdesk_core::{AccountId, AgencyName};

    use crate::{DirectoryAccount, InMemoryAccountDirectory};

    struct Pipeline {
        directory: Arc<InMemoryAccountDirectory>,
        codec: Hs256JwtValidator,
        verifier: CredentialVerifier,
        gate: AuthorizationGate,
    }

    fn setup() -> Pipeline {
        let secret = b"pipeline-test-secret".to_vec();
        let directory = InMemoryAccountDirectory::arc();
        let verifier = CredentialVerifier::new(
            Arc::new(Hs256JwtValidator::new(secret.clone())),
            directory.clone(),
        );
        let gate = AuthorizationGate::new(Arc::new(PermissionTable::builtin()));

        Pipeline {
            directory,
            codec: Hs256JwtValidator::new(secret),
            verifier,
            gate,
        }
    }

    impl Pipeline {
        fn seed(&self, email: &str, role: Role, agency: Option<&str>) -> AccountId {
            let agency = agency.map(|name| AgencyName::new(name).unwrap());
            let account = DirectoryAccount::new(email, role, agency);
            let id = account.id;
            self.directory.insert(account).unwrap();
            id
        }

        fn mint(&self, sub: AccountId, role: &str, now: DateTime<Utc>) -> String {
            let claims = JwtClaims {
                sub,
                role: role.to_string(),
                iat: now - Duration::minutes(1),
                exp: now + Duration::minutes(30),
            };
            self.codec.encode(&claims).unwrap()
        }
    }

    fn agency(name: &str) -> AgencyName {
        AgencyName::new(name).unwrap()
    }

    #[tokio::test]
    async fn admitted_write_walks_the_whole_pipeline() {
        let pipeline = setup();
        let now = Utc::now();
        let id = pipeline.seed("ops@metro.example", Role::Admin, Some("Metro Transit"));
        let token = pipeline.mint(id, "admin", now);

        // Authenticate.
        let principal = pipeline
            .verifier
            .authenticate(Some(&token), now)
            .await
            .unwrap();
        assert_eq!(principal.id, id);

        // Scope a create that names no agency: the caller's own is injected.
        let scoped = scope_request(&principal, RequestKind::Write, None).unwrap();
        assert_eq!(scoped.agency(), Some(&agency("Metro Transit")));

        // Gate against the scoped tenant.
        pipeline
            .gate
            .authorize(Some(&principal), "drivers:create", scoped.agency())
            .unwrap();
    }

    #[tokio::test]
    async fn live_role_change_applies_to_the_next_decision() {
        let pipeline = setup();
        let now = Utc::now();
        // Token minted while the account was an admin; the account has since
        // been reassigned to the fuel desk.
        let id = pipeline.seed("ops@metro.example", Role::Fuel, Some("Metro Transit"));
        let token = pipeline.mint(id, "admin", now);

        let principal = pipeline
            .verifier
            .authenticate(Some(&token), now)
            .await
            .unwrap();
        assert_eq!(principal.role, Role::Fuel);

        // Admin-only operations are gone despite the token's claim.
        let err = pipeline
            .gate
            .authorize(Some(&principal), "users:read", None)
            .unwrap_err();
        assert_eq!(err, AuthError::Forbidden("users:read".into()));

        // The fuel desk's own capability still works.
        pipeline
            .gate
            .authorize(Some(&principal), "fueltransactions:create", None)
            .unwrap();
    }

    #[tokio::test]
    async fn deactivation_rejects_at_authentication() {
        let pipeline = setup();
        let now = Utc::now();
        let id = pipeline.seed("dispatch@metro.example", Role::Manager, Some("Metro Transit"));
        let token = pipeline.mint(id, "manager", now);

        assert!(pipeline.verifier.authenticate(Some(&token), now).await.is_ok());

        pipeline.directory.set_active(id, false).unwrap();

        let err = pipeline
            .verifier
            .authenticate(Some(&token), now)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::PrincipalDeactivated);
    }

    #[tokio::test]
    async fn cross_tenant_write_dies_in_scoping_and_again_in_the_gate() {
        let pipeline = setup();
        let now = Utc::now();
        let id = pipeline.seed("ops@metro.example", Role::Admin, Some("Metro Transit"));
        let token = pipeline.mint(id, "admin", now);

        let principal = pipeline
            .verifier
            .authenticate(Some(&token), now)
            .await
            .unwrap();

        // First line of defense: scoping rejects the explicit foreign tenant.
        let err = scope_request(
            &principal,
            RequestKind::Write,
            Some(agency("Rural Lines")),
        )
        .unwrap_err();
        assert_eq!(err, AuthError::CrossTenantForbidden);

        // Second line: even a handler that skipped scoping cannot pass the
        // gate with a foreign resource tenant.
        let err = pipeline
            .gate
            .authorize(Some(&principal), "drivers:create", Some(&agency("Rural Lines")))
            .unwrap_err();
        assert_eq!(err, AuthError::Forbidden("drivers:create".into()));
    }

    #[tokio::test]
    async fn superadmin_pipeline_reaches_any_tenant() {
        let pipeline = setup();
        let now = Utc::now();
        let id = pipeline.seed("root@fleetdesk.example", Role::Superadmin, None);
        let token = pipeline.mint(id, "superadmin", now);

        let principal = pipeline
            .verifier
            .authenticate(Some(&token), now)
            .await
            .unwrap();
        assert!(principal.is_superadmin());
        assert_eq!(principal.agency, None);

        // Reads may span all agencies or target one explicitly.
        let all = scope_request(&principal, RequestKind::Read, None).unwrap();
        assert_eq!(all.agency(), None);
        let one = scope_request(&principal, RequestKind::Read, Some(agency("Rural Lines"))).unwrap();
        assert_eq!(one.agency(), Some(&agency("Rural Lines")));

        // Writes against any tenant clear the gate.
        pipeline
            .gate
            .authorize(Some(&principal), "agencies:delete", Some(&agency("Rural Lines")))
            .unwrap();
    }

    #[tokio::test]
    async fn pipeline_state_is_all_or_nothing() {
        let pipeline = setup();
        let now = Utc::now();

        // No credential: rejected before any lookup happens.
        let err = pipeline.verifier.authenticate(None, now).await.unwrap_err();
        assert_eq!(err, AuthError::MissingToken);

        // A principal that never authenticated cannot be admitted either.
        let err = pipeline
            .gate
            .authorize(None, "drivers:read", None)
            .unwrap_err();
        assert_eq!(err, AuthError::Unauthenticated);

        // An inactive principal smuggled past authentication is still caught.
        let ghost = Principal {
            id: AccountId::new(),
            role: Role::Admin,
            agency: Some(agency("Metro Transit")),
            is_active: false,
        };
        let err = pipeline
            .gate
            .authorize(Some(&ghost), "drivers:read", None)
            .unwrap_err();
        assert_eq!(err, AuthError::Unauthenticated);
    }
}
