use actix_web::{HttpResponse, web};

use crate::display::SharedDisplay;

pub async fn current_display(display: web::Data<SharedDisplay>) -> HttpResponse {
    HttpResponse::Ok().json(display.snapshot())
}
