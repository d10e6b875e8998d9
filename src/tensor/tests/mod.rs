mod elementwise;
mod mat_mul;
