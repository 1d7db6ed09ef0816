pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

/// Mounts all `/api` routes. Task routes live under `/users/tasks` to match
/// the public route table.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::signup)
            .service(auth::login)
            .service(auth::me),
    )
    .service(
        web::scope("/users")
            .service(users::update_profile)
            .service(users::change_password)
            .service(users::delete_account)
            .service(tasks::create_task)
            .service(tasks::list_tasks)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}
