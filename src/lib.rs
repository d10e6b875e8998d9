//! # HyperGAN
//!
//! `hypergan`是一个用纯 rust 编写的可配置 GAN（生成对抗网络）训练框架：
//! 在一个轻量的静态计算图（自动求导）之上，提供生成器/判别器的参数划分、
//! “同时”对抗训练循环（两次互相隔离的反向传播 + 一次联合优化）、训练钩子，
//! 以及专为对抗训练设计的 Adamirror 优化器。
//!

pub mod errors;
pub mod gan;
pub mod nn;
pub mod tensor;
pub mod utils;
