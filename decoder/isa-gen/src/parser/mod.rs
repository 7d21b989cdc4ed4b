pub mod avr8;
