pub mod recipe;
pub mod system;

use actix_web::web;

/// Recipe endpoint and the path the original front-end still posts to
pub const RECIPE_PATHS: [&str; 2] = ["/api/recipe", "/.netlify/functions/getRecipe"];

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    for path in RECIPE_PATHS {
        cfg.service(
            web::resource(path)
                .route(web::post().to(recipe::create_recipe))
                .default_service(web::to(recipe::method_not_allowed)),
        );
    }

    cfg.service(system::health);
}
