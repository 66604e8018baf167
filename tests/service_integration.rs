//! Scenario tests against the application services
//!
//! Each test builds services over a fresh in-memory store and its own
//! signing key, then walks through one end-to-end scenario.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use staffbook_api::auth::access::Caller;
use staffbook_api::auth::jwt::{TokenCodec, TokenConfig, TokenError};
use staffbook_api::auth::password::BcryptHasher;
use staffbook_api::domain::contract::{ContractTerms, ContractType};
use staffbook_api::domain::errors::DomainError;
use staffbook_api::domain::user::{Role, User};
use staffbook_api::domain::vacation::{VacationChanges, VacationStatus};
use staffbook_api::infrastructure::repositories::Repositories;
use staffbook_api::services::{CompanyInput, NewUser, Services, UserChanges};
use uuid::Uuid;

struct World {
    services: Services,
    tokens: Arc<TokenCodec>,
    company_id: Uuid,
    admin: Caller,
    employee: User,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_user(name: &str, email: &str, role: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password: "secret".to_string(),
        role: role.to_string(),
    }
}

async fn world(secret: &str) -> World {
    let tokens = Arc::new(TokenCodec::new(&TokenConfig::new(secret)));
    let services = Services::new(
        Repositories::in_memory(),
        Arc::new(BcryptHasher::new(4)),
        tokens.clone(),
    );

    let company = services
        .companies
        .create(CompanyInput {
            name: "Acme".to_string(),
            tax_id: "B-87654321".to_string(),
        })
        .await
        .unwrap();
    let admin = services
        .users
        .create(None, company.id(), new_user("Root", "root@acme.test", "ADMIN"))
        .await
        .unwrap();
    let admin = Caller::new(admin.id(), admin.role());
    let employee = services
        .users
        .create(
            Some(&admin),
            company.id(),
            new_user("Ada", "ada@acme.test", "EMPLOYEE"),
        )
        .await
        .unwrap();

    World {
        services,
        tokens,
        company_id: company.id(),
        admin,
        employee,
    }
}

fn temporary(end_date: Option<NaiveDate>) -> ContractTerms {
    ContractTerms {
        start_date: date(2024, 1, 1),
        end_date,
        contract_type: ContractType::Temporary,
        position: "Analyst".to_string(),
        salary: Decimal::new(2400000, 2),
    }
}

#[tokio::test]
async fn login_for_unknown_email_is_invalid_credentials() {
    let w = world("scenario-unknown-email-key-0123456789").await;

    let result = w.services.users.login("a@x.com", "secret").await;
    assert_eq!(result.unwrap_err(), DomainError::InvalidCredentials);
}

#[tokio::test]
async fn login_token_carries_identity_and_expires_after_a_day() {
    let w = world("scenario-login-token-key-0123456789ab").await;

    let outcome = w
        .services
        .users
        .login("ada@acme.test", "secret")
        .await
        .unwrap();
    let claims = w.tokens.verify(&outcome.token).unwrap();
    assert_eq!(claims.sub, w.employee.id());
    assert_eq!(claims.role, Role::Employee);
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);

    let stale = w
        .tokens
        .issue_at(w.employee.id(), Role::Employee, Utc::now() - Duration::hours(25))
        .unwrap();
    assert_eq!(w.tokens.verify(&stale), Err(TokenError::Expired));
}

#[tokio::test]
async fn token_from_another_key_is_rejected() {
    let w = world("scenario-first-signing-key-0123456789").await;
    let other = world("scenario-second-signing-key-012345678").await;

    let token = other.tokens.issue(w.employee.id(), Role::Admin).unwrap();
    assert_eq!(w.tokens.verify(&token), Err(TokenError::SignatureInvalid));
}

#[tokio::test]
async fn temporary_contract_end_date_scenario() {
    let w = world("scenario-temporary-contract-key-01234").await;
    let contracts = &w.services.contracts;
    let user_id = w.employee.id();

    let missing = contracts.create(&w.admin, user_id, temporary(None)).await;
    assert!(matches!(missing, Err(DomainError::InvalidInput(_))));

    let before_start = contracts
        .create(&w.admin, user_id, temporary(Some(date(2023, 12, 31))))
        .await;
    assert!(matches!(before_start, Err(DomainError::InvalidInput(_))));

    let accepted = contracts
        .create(&w.admin, user_id, temporary(Some(date(2024, 6, 1))))
        .await
        .unwrap();
    assert_eq!(accepted.end_date(), Some(date(2024, 6, 1)));
}

#[tokio::test]
async fn indefinite_contract_never_keeps_an_end_date() {
    let w = world("scenario-indefinite-contract-key-0123").await;

    let contract = w
        .services
        .contracts
        .create(
            &w.admin,
            w.employee.id(),
            ContractTerms {
                contract_type: ContractType::Indefinite,
                ..temporary(Some(date(2030, 1, 1)))
            },
        )
        .await
        .unwrap();
    assert_eq!(contract.end_date(), None);

    let updated = w
        .services
        .contracts
        .update(
            &w.admin,
            contract.id(),
            ContractTerms {
                contract_type: ContractType::Indefinite,
                ..temporary(Some(date(2031, 1, 1)))
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.end_date(), None);
}

#[tokio::test]
async fn vacation_starts_pending_and_rejects_reversed_range() {
    let w = world("scenario-vacation-key-0123456789abcdef").await;
    let caller = Caller::new(w.employee.id(), w.employee.role());

    let reversed = w
        .services
        .vacations
        .create(&caller, w.employee.id(), date(2024, 3, 10), date(2024, 3, 1))
        .await;
    assert!(matches!(reversed, Err(DomainError::InvalidInput(_))));

    let vacation = w
        .services
        .vacations
        .create(&caller, w.employee.id(), date(2024, 3, 1), date(2024, 3, 10))
        .await
        .unwrap();
    assert_eq!(vacation.status(), VacationStatus::Pending);

    let approved = w
        .services
        .vacations
        .update(
            &w.admin,
            vacation.id(),
            VacationChanges {
                status: Some(VacationStatus::Approved),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(approved.status(), VacationStatus::Approved);
}

#[tokio::test]
async fn employee_role_escalation_keeps_prior_role() {
    let w = world("scenario-escalation-key-0123456789abcd").await;
    let caller = Caller::new(w.employee.id(), w.employee.role());

    w.services
        .users
        .update(
            &caller,
            w.employee.id(),
            UserChanges {
                name: "Ada".to_string(),
                email: "ada@acme.test".to_string(),
                role: Some("ADMIN".to_string()),
            },
        )
        .await
        .unwrap();

    let stored = w.services.users.get(&w.admin, w.employee.id()).await.unwrap();
    assert_eq!(stored.role(), Role::Employee);

    // A fresh login still yields an employee token
    let outcome = w
        .services
        .users
        .login("ada@acme.test", "secret")
        .await
        .unwrap();
    assert_eq!(w.tokens.verify(&outcome.token).unwrap().role, Role::Employee);
}

#[tokio::test]
async fn batch_with_one_invalid_user_persists_none() {
    let w = world("scenario-batch-key-0123456789abcdefghij").await;

    let result = w
        .services
        .users
        .create_batch(
            Some(&w.admin),
            w.company_id,
            vec![
                new_user("One", "one@acme.test", "EMPLOYEE"),
                new_user("Two", "two@acme.test", "EMPLOYEE"),
                new_user("Three", "three@acme.test", "MANAGER"),
            ],
        )
        .await;
    assert!(matches!(result, Err(DomainError::InvalidInput(_))));

    let users = w
        .services
        .users
        .list_by_company(&w.admin, w.company_id)
        .await
        .unwrap();
    assert_eq!(users.len(), 2);
    for email in ["one@acme.test", "two@acme.test", "three@acme.test"] {
        let login = w.services.users.login(email, "secret").await;
        assert_eq!(login.unwrap_err(), DomainError::InvalidCredentials);
    }
}
