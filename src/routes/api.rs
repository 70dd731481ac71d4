use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::clothing::{AddClothingForm, EditClothingForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::clothes as service;

#[get("/clothes")]
pub async fn list_clothes(repo: web::Data<DieselRepository>) -> impl Responder {
    match service::list_clothes(repo.get_ref()) {
        Ok(clothes) => HttpResponse::Ok().json(clothes),
        Err(err) => error_response(&err),
    }
}

#[post("/clothes")]
pub async fn create_clothing(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddClothingForm>,
) -> impl Responder {
    match service::create_clothing(repo.get_ref(), form.into_inner()) {
        Ok(clothing) => {
            log::info!("Added clothing {}", clothing.id);
            HttpResponse::Created().json(clothing)
        }
        Err(err) => error_response(&err),
    }
}

#[get("/clothes/season/{season}")]
pub async fn list_clothes_by_season(
    repo: web::Data<DieselRepository>,
    season: web::Path<String>,
) -> impl Responder {
    match service::list_clothes_by_season(repo.get_ref(), &season) {
        Ok(clothes) => HttpResponse::Ok().json(clothes),
        Err(err) => error_response(&err),
    }
}

#[get("/clothes/type/{clothing_type}")]
pub async fn list_clothes_by_type(
    repo: web::Data<DieselRepository>,
    clothing_type: web::Path<String>,
) -> impl Responder {
    match service::list_clothes_by_type(repo.get_ref(), &clothing_type) {
        Ok(clothes) => HttpResponse::Ok().json(clothes),
        Err(err) => error_response(&err),
    }
}

#[get("/clothes/{id}")]
pub async fn get_clothing(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
) -> impl Responder {
    match service::get_clothing(repo.get_ref(), &id) {
        Ok(clothing) => HttpResponse::Ok().json(clothing),
        Err(err) => error_response(&err),
    }
}

#[put("/clothes/{id}")]
pub async fn update_clothing(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
    form: web::Json<EditClothingForm>,
) -> impl Responder {
    match service::update_clothing(repo.get_ref(), &id, form.into_inner()) {
        Ok(clothing) => HttpResponse::Ok().json(clothing),
        Err(err) => error_response(&err),
    }
}

#[delete("/clothes/{id}")]
pub async fn delete_clothing(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
) -> impl Responder {
    match service::delete_clothing(repo.get_ref(), &id) {
        Ok(()) => {
            log::info!("Deleted clothing {id}");
            HttpResponse::NoContent().finish()
        }
        Err(err) => error_response(&err),
    }
}
