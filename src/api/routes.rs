use actix_web::web;

use crate::api::handlers::{
    crops::{get_crop, list_crops, reload_crops},
    gardens::{get_garden, list_garden_previews, list_gardens},
    users::get_user,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(list_crops)
            .service(reload_crops)
            .service(get_crop)
            .service(list_gardens)
            // Must precede /gardens/{id}.
            .service(list_garden_previews)
            .service(get_garden)
            .service(get_user),
    );
}
