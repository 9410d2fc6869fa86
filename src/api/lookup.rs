use actix_web::{Error, HttpResponse, web};

use crate::display::{DisplayState, SharedDisplay};
use crate::geo::position::ReportedPosition;
use crate::geo::resolver::AddressResolver;
use crate::lookup::run_lookup;

/// One lookup cycle per request.
///
/// Always answers 200 with the rendered display; failures are reported
/// in its `status` field.
pub async fn lookup_address(
    request: web::Query<ReportedPosition>,
    resolver: web::Data<AddressResolver>,
    display: web::Data<SharedDisplay>
) -> Result<HttpResponse, Error> {
    let source = request.into_inner();
    let mut sink = (DisplayState::default(), display.get_ref());

    run_lookup(&source, &resolver, &mut sink).await;

    let (rendered, _) = sink;
    Ok(HttpResponse::Ok().json(rendered))
}
