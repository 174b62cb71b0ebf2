pub mod add;
pub mod mul_elem;
pub mod neg;
pub mod scale;
pub mod sub;

pub use add::add_op;
pub use mul_elem::elementwise_product_op;
pub use neg::neg_op;
pub use scale::scale_op;
pub use sub::sub_op;
