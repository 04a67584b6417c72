// one binary for every black-box test; see helpers::spawn_app
mod excel_upload;
mod health_check;
mod helpers;
mod send_email;
