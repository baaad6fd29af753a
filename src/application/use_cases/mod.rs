mod request_advice;
mod submit_advice_form;

pub use request_advice::*;
pub use submit_advice_form::*;
